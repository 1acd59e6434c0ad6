//! Product list filter bar
//!
//! A fixed registry of named filter fields. Each active field contributes
//! one predicate; active predicates AND-compose. An unknown field name is a
//! programmer error (schema/UI mismatch) and fails fast.

use shared::models::Product;

use crate::fields::FieldValue;

/// Filter field names, the closed schema of the product list filter bar
pub const FIELD_NAME: &str = "name";
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_SUBCATEGORIES: &str = "subcategories";
pub const FIELD_SUPPLIERS: &str = "suppliers";
pub const FIELD_RELEASE_DATE: &str = "release_date";

/// Filter bar over the product list
#[derive(Debug, Clone)]
pub struct FilterBar {
    fields: Vec<(&'static str, FieldValue)>,
}

impl FilterBar {
    /// Create the filter bar with every field in its empty state
    pub fn new() -> Self {
        Self {
            fields: vec![
                (FIELD_NAME, FieldValue::Text(None)),
                (FIELD_CATEGORY, FieldValue::Select(None)),
                (FIELD_SUBCATEGORIES, FieldValue::MultiSelect(Vec::new())),
                (FIELD_SUPPLIERS, FieldValue::MultiSelect(Vec::new())),
                (FIELD_RELEASE_DATE, FieldValue::DateRange(None)),
            ],
        }
    }

    /// Set a field's value.
    ///
    /// Panics on an unknown field name or a control-kind mismatch, both are
    /// programmer errors.
    pub fn set_value(&mut self, name: &str, value: FieldValue) {
        let slot = self
            .fields
            .iter_mut()
            .find(|(field_name, _)| *field_name == name)
            .unwrap_or_else(|| panic!("Unknown filter field '{}'", name));

        if std::mem::discriminant(&slot.1) != std::mem::discriminant(&value) {
            panic!("Control kind mismatch for filter field '{}'", name);
        }

        slot.1 = value;
    }

    /// Current value of a field; panics on an unknown name
    pub fn value(&self, name: &str) -> &FieldValue {
        self.fields
            .iter()
            .find(|(field_name, _)| *field_name == name)
            .map(|(_, value)| value)
            .unwrap_or_else(|| panic!("Unknown filter field '{}'", name))
    }

    /// Set every field back to its empty representation
    pub fn reset_fields(&mut self) {
        for (_, value) in &mut self.fields {
            value.reset();
        }
    }

    /// Whether any field is active
    pub fn is_active(&self) -> bool {
        self.fields.iter().any(|(_, value)| !value.is_empty())
    }

    /// Combined predicate: every active field must accept the product
    pub fn matches(&self, product: &Product) -> bool {
        self.fields
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .all(|(name, value)| Self::field_matches(name, value, product))
    }

    /// Predicate of one active field, dispatched by field name
    fn field_matches(name: &str, value: &FieldValue, product: &Product) -> bool {
        match (name, value) {
            (FIELD_NAME, FieldValue::Text(Some(query))) => {
                // Case-insensitive substring match
                product
                    .name
                    .to_lowercase()
                    .contains(&query.trim().to_lowercase())
            }

            (FIELD_CATEGORY, FieldValue::Select(Some(key))) => product.category_id == *key,

            (FIELD_SUBCATEGORIES, FieldValue::MultiSelect(keys)) => keys
                .iter()
                .any(|key| product.subcategory_ids.iter().any(|id| id == key)),

            (FIELD_SUPPLIERS, FieldValue::MultiSelect(keys)) => keys
                .iter()
                .any(|key| product.supplier_ids.iter().any(|id| id == key)),

            (FIELD_RELEASE_DATE, FieldValue::DateRange(Some((start, end)))) => {
                // Inclusive bounds on the calendar date
                let released = product.release_date.date_naive();
                released >= *start && released <= *end
            }

            _ => panic!("Can't create filter predicate for product field '{}'", name),
        }
    }
}

impl Default for FilterBar {
    fn default() -> Self {
        Self::new()
    }
}
