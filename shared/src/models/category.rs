//! Category and Subcategory Models
//!
//! Read-only master data from the client's perspective.

use serde::{Deserialize, Serialize};

/// Category entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Subcategory entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: String,
    pub name: String,
    /// Owning category reference (String ID)
    pub category_id: String,
}
