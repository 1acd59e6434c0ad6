//! Product table state
//!
//! 可见行 = 快照经过滤、分组、排序后的结果。选择按 id 跟踪，任何重建后
//! 按标识符重新套用。批量删除经确认后以单个变更集提交。

use catalog_client::CatalogBackend;
use shared::changes::{ChangeOp, ChangeSet};
use shared::error::AppResult;
use shared::models::Product;

use crate::constants::DELETE_PRODUCTS_GROUP;
use crate::fields::FieldValue;
use crate::filters::{order_products, FilterBar, GroupBucket, GroupKey, Grouping, SortField, Sorter};

/// View state of the products overview table
#[derive(Debug, Clone)]
pub struct ProductTable {
    /// Row snapshot in insertion order
    rows: Vec<Product>,
    /// Rows after filter and ordering
    visible: Vec<Product>,
    filter_bar: FilterBar,
    sorter: Option<Sorter>,
    grouping: Option<Grouping>,
    /// Selection, tracked by id rather than row position
    selected_ids: Vec<String>,
}

impl ProductTable {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            visible: Vec::new(),
            filter_bar: FilterBar::new(),
            sorter: None,
            grouping: None,
            selected_ids: Vec::new(),
        }
    }

    /// Replace the row snapshot and rebuild
    pub fn set_rows(&mut self, rows: Vec<Product>) {
        self.rows = rows;
        self.rebuild();
    }

    /// Reload the snapshot from the backend
    pub async fn refresh(&mut self, backend: &dyn CatalogBackend) -> AppResult<()> {
        let rows = backend.list_products().await?;
        self.set_rows(rows);
        Ok(())
    }

    // ========== Filtering ==========

    /// Set one filter field and rebuild
    pub fn set_filter_value(&mut self, name: &str, value: FieldValue) {
        self.filter_bar.set_value(name, value);
        self.rebuild();
    }

    /// Clear every filter field and rebuild
    pub fn reset_filters(&mut self) {
        self.filter_bar.reset_fields();
        self.rebuild();
    }

    pub fn filter_bar(&self) -> &FilterBar {
        &self.filter_bar
    }

    // ========== Ordering ==========

    /// Set the sorter; `None` restores insertion order. Grouping is
    /// untouched.
    pub fn set_sorter(&mut self, path: Option<&str>, descending: bool) {
        self.sorter = path
            .filter(|p| !p.is_empty())
            .map(|p| Sorter::new(SortField::from_path(p), descending));
        self.rebuild();
    }

    /// Set the grouping rule; `None` removes it. The sorter is untouched.
    pub fn set_grouping(&mut self, path: Option<&str>, descending: bool) {
        self.grouping = path
            .filter(|p| !p.is_empty())
            .map(|p| Grouping::new(GroupKey::from_path(p), descending));
        self.rebuild();
    }

    pub fn sorter(&self) -> Option<Sorter> {
        self.sorter
    }

    pub fn grouping(&self) -> Option<Grouping> {
        self.grouping
    }

    /// Bucket of a visible row under the active grouping
    pub fn bucket_of(&self, product: &Product) -> Option<GroupBucket> {
        self.grouping.map(|rule| rule.bucket(product))
    }

    // ========== Rows and selection ==========

    pub fn visible(&self) -> &[Product] {
        &self.visible
    }

    /// Replace the selection (UI selection change)
    pub fn set_selected(&mut self, ids: Vec<String>) {
        self.selected_ids = ids;
    }

    pub fn selected_ids(&self) -> &[String] {
        &self.selected_ids
    }

    pub fn selected_count(&self) -> usize {
        self.selected_ids.len()
    }

    /// Recompute visible rows, then re-apply the previous selection by id
    fn rebuild(&mut self) {
        let mut visible: Vec<Product> = self
            .rows
            .iter()
            .filter(|product| self.filter_bar.matches(product))
            .cloned()
            .collect();

        order_products(&mut visible, self.grouping.as_ref(), self.sorter.as_ref());
        self.visible = visible;

        let visible = &self.visible;
        self.selected_ids
            .retain(|id| visible.iter().any(|product| product.id == *id));
    }

    // ========== Batch delete ==========

    /// Delete the selected products, gated on the user's confirmation.
    ///
    /// Rejection leaves rows and selection untouched. Confirmation submits
    /// one change set for all selected ids, then reloads the snapshot.
    /// Returns the number of deleted products.
    pub async fn delete_selected(
        &mut self,
        backend: &dyn CatalogBackend,
        confirmed: bool,
    ) -> AppResult<usize> {
        if !confirmed || self.selected_ids.is_empty() {
            return Ok(0);
        }

        let ids = self.selected_ids.clone();
        let count = ids.len();

        let mut batch = ChangeSet::new(DELETE_PRODUCTS_GROUP);
        batch.push(ChangeOp::DeleteProducts { ids });

        backend.submit(batch).await?;
        tracing::debug!(count, "Selected products deleted");

        self.refresh(backend).await?;
        Ok(count)
    }
}

impl Default for ProductTable {
    fn default() -> Self {
        Self::new()
    }
}
