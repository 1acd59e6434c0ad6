//! Join-row models for many-to-many relations
//!
//! Existence of a row implies membership. Rows are added and removed,
//! never updated.

use serde::{Deserialize, Serialize};

/// Product-subcategory relation row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSubcategory {
    pub product_id: String,
    pub subcategory_id: String,
}

/// Product-supplier relation row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSupplier {
    pub product_id: String,
    pub supplier_id: String,
}
