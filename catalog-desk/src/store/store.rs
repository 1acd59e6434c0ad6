//! Generic keyed in-memory collection

use shared::error::{AppError, AppResult};
use shared::util;

/// Types that can live in a [`Store`]
pub trait Entity: Clone {
    /// Entity kind name used in error messages
    const KIND: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);

    /// Generate a fresh id for a record being created.
    ///
    /// Millisecond timestamp by default; entity kinds with natural keys
    /// override this.
    fn generate_id(&self) -> String {
        util::timestamp_id()
    }
}

/// In-memory keyed collection, insertion-ordered
#[derive(Debug, Clone, Default)]
pub struct Store<T: Entity> {
    items: Vec<T>,
}

impl<T: Entity> Store<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Create a store seeded with records that already carry ids
    pub fn with_items(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Snapshot of every record, in insertion order
    pub fn all(&self) -> Vec<T> {
        self.items.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Record with the given id
    pub fn get(&self, id: &str) -> Option<T> {
        self.items.iter().find(|item| item.id() == id).cloned()
    }

    /// Whether a record with the given id exists
    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    /// Map each id through [`Store::get`], preserving input order.
    ///
    /// Unresolved ids stay in the output as `None`, the caller filters.
    pub fn expand_by_ids(&self, ids: &[String]) -> Vec<Option<T>> {
        ids.iter().map(|id| self.get(id)).collect()
    }

    /// Insert a record that already carries its id (seeding, staged copies)
    pub fn insert(&mut self, item: T) {
        self.items.push(item);
    }

    /// Create a record, assigning it a freshly generated id
    pub fn create(&mut self, mut item: T) -> T {
        let id = item.generate_id();
        item.set_id(id);
        self.items.push(item.clone());
        item
    }

    /// Create several records, assigning each a freshly generated id
    pub fn create_many(&mut self, items: Vec<T>) -> Vec<T> {
        items.into_iter().map(|item| self.create(item)).collect()
    }

    /// Apply a mutation to the record with the given id.
    ///
    /// An absent id is an explicit error, not a silent no-op.
    pub fn update(&mut self, id: &str, apply: impl FnOnce(&mut T)) -> AppResult<()> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| AppError::not_found(T::KIND, id))?;

        apply(item);
        Ok(())
    }

    /// Remove every record whose id is listed; unmatched ids are ignored
    pub fn delete(&mut self, ids: &[String]) {
        self.items
            .retain(|item| !ids.iter().any(|id| id.as_str() == item.id()));
    }
}

// ========== Entity impls ==========

impl Entity for shared::models::Product {
    const KIND: &'static str = "Product";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Entity for shared::models::Category {
    const KIND: &'static str = "Category";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Entity for shared::models::Subcategory {
    const KIND: &'static str = "Subcategory";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Entity for shared::models::Supplier {
    const KIND: &'static str = "Supplier";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    /// Suppliers get a name-derived id ("Acme Corp." -> "AcmeCorp")
    fn generate_id(&self) -> String {
        util::slug_id(&self.name)
    }
}

impl Entity for shared::models::Comment {
    const KIND: &'static str = "Comment";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Supplier;

    fn supplier(name: &str) -> Supplier {
        Supplier {
            id: String::new(),
            name: name.into(),
            country: "US".into(),
            state: "CA".into(),
            city: "San Jose".into(),
            street: "1 Main St".into(),
            zip_code: "95113".into(),
        }
    }

    #[test]
    fn test_create_assigns_name_derived_supplier_id() {
        let mut store = Store::new();
        let created = store.create(supplier("Acme Corp."));

        assert_eq!(created.id, "AcmeCorp");
        assert!(store.get("AcmeCorp").is_some());
    }

    #[test]
    fn test_expand_by_ids_keeps_order_and_holes() {
        let mut store = Store::new();
        store.create(supplier("Alpha"));
        store.create(supplier("Beta"));

        let expanded = store.expand_by_ids(&[
            "Beta".to_string(),
            "ghost".to_string(),
            "Alpha".to_string(),
        ]);

        assert_eq!(expanded.len(), 3);
        assert_eq!(expanded[0].as_ref().unwrap().name, "Beta");
        assert!(expanded[1].is_none());
        assert_eq!(expanded[2].as_ref().unwrap().name, "Alpha");
    }

    #[test]
    fn test_update_missing_id_is_an_error() {
        let mut store: Store<Supplier> = Store::new();
        let result = store.update("ghost", |s| s.city = "Nowhere".into());

        assert!(matches!(
            result,
            Err(shared::AppError::NotFound { entity: "Supplier", .. })
        ));
    }

    #[test]
    fn test_delete_ignores_unmatched_ids() {
        let mut store = Store::new();
        store.create(supplier("Alpha"));
        store.delete(&["ghost".to_string(), "Alpha".to_string()]);

        assert!(store.is_empty());
    }
}
