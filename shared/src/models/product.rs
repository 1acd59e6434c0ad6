//! Product Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, Comment, Subcategory, Supplier};

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub rating: f32,
    pub release_date: DateTime<Utc>,
    /// Optional discount start, never earlier than `release_date`
    pub discount_date: Option<DateTime<Utc>>,
    /// Price in cents
    pub price_cents: i64,
    /// Image URI
    pub image: Option<String>,
    /// Category reference (String ID, required)
    pub category_id: String,

    // -- Relations (populated by application code via join rows) --

    /// Subcategory references (junction table)
    #[serde(default)]
    pub subcategory_ids: Vec<String>,
    /// Supplier references (junction table)
    #[serde(default)]
    pub supplier_ids: Vec<String>,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: String,
    pub rating: f32,
    pub release_date: DateTime<Utc>,
    pub discount_date: Option<DateTime<Utc>>,
    pub price_cents: i64,
    pub image: Option<String>,
    pub category_id: String,
}

/// Update product payload, `None` fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub rating: Option<f32>,
    pub release_date: Option<DateTime<Utc>>,
    /// `Some(None)` clears the discount date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_date: Option<Option<DateTime<Utc>>>,
    pub price_cents: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Option<String>>,
    pub category_id: Option<String>,
}

impl ProductUpdate {
    /// Whether the update carries no changes at all
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.rating.is_none()
            && self.release_date.is_none()
            && self.discount_date.is_none()
            && self.price_cents.is_none()
            && self.image.is_none()
            && self.category_id.is_none()
    }
}

/// Product with expanded relations, as returned by a detail read
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetails {
    pub product: Product,
    pub category: Option<Category>,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
    #[serde(default)]
    pub suppliers: Vec<Supplier>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}
