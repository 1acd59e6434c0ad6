//! Editable product draft
//!
//! A value-semantics shadow of one product for the lifetime of an edit
//! session. Mutating the draft never touches the committed entity; the
//! draft is reconciled back through a change set on save.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use shared::models::{Product, ProductCreate, ProductUpdate};

/// Editable copy of a product's scalar fields plus the subcategory selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub rating: Option<f32>,
    pub release_date: Option<NaiveDate>,
    pub discount_date: Option<NaiveDate>,
    pub price_cents: Option<i64>,
    pub image: Option<String>,
    pub category_id: Option<String>,
    /// Selected subcategory ids (multi-select state)
    pub subcategory_ids: Vec<String>,
}

/// Calendar date to the UTC instant at midnight
fn date_to_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

impl ProductDraft {
    /// Structural copy of a committed product
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: Some(product.name.clone()),
            description: if product.description.is_empty() {
                None
            } else {
                Some(product.description.clone())
            },
            rating: Some(product.rating),
            release_date: Some(product.release_date.date_naive()),
            discount_date: product.discount_date.map(|d| d.date_naive()),
            price_cents: Some(product.price_cents),
            image: product.image.clone(),
            category_id: Some(product.category_id.clone()),
            subcategory_ids: product.subcategory_ids.clone(),
        }
    }

    /// Create payload, `None` while a required field is missing
    pub fn to_create(&self) -> Option<ProductCreate> {
        Some(ProductCreate {
            name: self.name.clone()?,
            description: self.description.clone().unwrap_or_default(),
            rating: self.rating.unwrap_or(0.0),
            release_date: date_to_utc(self.release_date?),
            discount_date: self.discount_date.map(date_to_utc),
            price_cents: self.price_cents?,
            image: self.image.clone(),
            category_id: self.category_id.clone()?,
        })
    }

    /// Scalar diff against the committed product: only changed fields are set
    pub fn diff(&self, original: &Product) -> ProductUpdate {
        let mut changes = ProductUpdate::default();

        if let Some(name) = &self.name {
            if *name != original.name {
                changes.name = Some(name.clone());
            }
        }

        let description = self.description.clone().unwrap_or_default();
        if description != original.description {
            changes.description = Some(description);
        }

        if let Some(rating) = self.rating {
            if rating != original.rating {
                changes.rating = Some(rating);
            }
        }

        if let Some(release_date) = self.release_date {
            if release_date != original.release_date.date_naive() {
                changes.release_date = Some(date_to_utc(release_date));
            }
        }

        if self.discount_date != original.discount_date.map(|d| d.date_naive()) {
            changes.discount_date = Some(self.discount_date.map(date_to_utc));
        }

        if let Some(price_cents) = self.price_cents {
            if price_cents != original.price_cents {
                changes.price_cents = Some(price_cents);
            }
        }

        if self.image != original.image {
            changes.image = Some(self.image.clone());
        }

        if let Some(category_id) = &self.category_id {
            if *category_id != original.category_id {
                changes.category_id = Some(category_id.clone());
            }
        }

        changes
    }
}
