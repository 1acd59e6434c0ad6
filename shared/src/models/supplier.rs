//! Supplier Model

use serde::{Deserialize, Serialize};

/// Supplier entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub street: String,
    /// Integer-like string, 4 to 9 digits
    pub zip_code: String,
}

/// Create supplier payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupplierCreate {
    pub name: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub street: String,
    pub zip_code: String,
}
