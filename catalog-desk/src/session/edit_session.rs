//! 商品编辑会话
//!
//! 一个商品的创建/编辑状态机: Viewing -> Editing -> { Saving -> Viewing |
//! Cancelled }。创建模式是 Editing 的变体，在第一次保存成功前没有已提交
//! 实体。会话独占草稿与关系增量；保存通过变更集一次性提交，取消无条件丢弃。

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};

use catalog_client::CatalogBackend;
use shared::changes::{ChangeOp, ChangeSet};
use shared::error::AppError;
use shared::models::{CommentCreate, ProductDetails, Supplier};

use crate::constants::{
    DELETE_PRODUCTS_GROUP, POST_COMMENT_GROUP, PRODUCT_RELATIONS_GROUP, SAVE_PRODUCT_GROUP,
};
use crate::fields::{missing_required, FieldValue, FormField};
use crate::session::{ProductDraft, SessionError};

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Viewing,
    Editing,
    Saving,
    /// Create mode was cancelled, the session is finished
    Closed,
}

/// Edit session over one product
#[derive(Debug)]
pub struct EditSession {
    state: SessionState,
    create_mode: bool,
    /// Committed product id, `None` until the first successful create
    product_id: Option<String>,
    /// Committed snapshot backing an edit (absent in create mode)
    original: Option<ProductDetails>,
    draft: ProductDraft,

    /// Supplier master records pending linkage
    suppliers_to_add: Vec<Supplier>,
    /// Linked supplier ids pending removal
    suppliers_to_remove: Vec<String>,

    field_errors: BTreeMap<&'static str, String>,

    /// Lower bound for the discount date (the release date)
    min_discount_date: Option<NaiveDate>,
    /// Upper bound for discount and release dates (today)
    max_date: NaiveDate,
}

impl EditSession {
    /// Start a create-mode session with a skeleton draft
    pub fn create() -> Self {
        Self {
            state: SessionState::Editing,
            create_mode: true,
            product_id: None,
            original: None,
            draft: ProductDraft::default(),
            suppliers_to_add: Vec::new(),
            suppliers_to_remove: Vec::new(),
            field_errors: BTreeMap::new(),
            min_discount_date: None,
            max_date: Utc::now().date_naive(),
        }
    }

    /// Start a session over a committed product, in viewing state
    pub fn open(details: ProductDetails) -> Self {
        Self {
            state: SessionState::Viewing,
            create_mode: false,
            product_id: Some(details.product.id.clone()),
            draft: ProductDraft::from_product(&details.product),
            original: Some(details),
            suppliers_to_add: Vec::new(),
            suppliers_to_remove: Vec::new(),
            field_errors: BTreeMap::new(),
            min_discount_date: None,
            max_date: Utc::now().date_naive(),
        }
    }

    /// Switch a viewing session into edit mode.
    ///
    /// Clones the committed product into a fresh draft, clears the relation
    /// deltas and derives the date bounds.
    pub fn edit(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Viewing {
            return Err(SessionError::NotEditing);
        }
        let original = self.original.as_ref().ok_or(SessionError::NoProduct)?;

        self.draft = ProductDraft::from_product(&original.product);
        self.suppliers_to_add.clear();
        self.suppliers_to_remove.clear();
        self.field_errors.clear();
        self.min_discount_date = self.draft.release_date;
        self.max_date = Utc::now().date_naive();
        self.state = SessionState::Editing;

        Ok(())
    }

    // ========== Accessors ==========

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_create_mode(&self) -> bool {
        self.create_mode
    }

    pub fn is_edit_mode(&self) -> bool {
        matches!(self.state, SessionState::Editing | SessionState::Saving)
    }

    pub fn product_id(&self) -> Option<&str> {
        self.product_id.as_deref()
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    pub fn original(&self) -> Option<&ProductDetails> {
        self.original.as_ref()
    }

    pub fn min_discount_date(&self) -> Option<NaiveDate> {
        self.min_discount_date
    }

    pub fn max_date(&self) -> NaiveDate {
        self.max_date
    }

    /// The weak check: no field currently carries an error state
    pub fn is_form_valid(&self) -> bool {
        self.field_errors.is_empty()
    }

    pub fn field_error(&self, name: &str) -> Option<&str> {
        self.field_errors.get(name).map(String::as_str)
    }

    // ========== Draft mutators ==========

    pub fn set_name(&mut self, name: Option<String>) {
        self.draft.name = name;
        self.clear_error_if_filled("name", FieldValue::Text(self.draft.name.clone()));
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.draft.description = description;
    }

    pub fn set_rating(&mut self, rating: Option<f32>) {
        self.draft.rating = rating;
    }

    pub fn set_price_cents(&mut self, price_cents: Option<i64>) {
        self.draft.price_cents = price_cents;
        self.clear_error_if_filled(
            "price",
            FieldValue::Text(self.draft.price_cents.map(|c| c.to_string())),
        );
    }

    pub fn set_image(&mut self, image: Option<String>) {
        self.draft.image = image;
    }

    /// Changing the category clears the subcategory selection, the options
    /// list is sourced per category
    pub fn set_category(&mut self, category_id: Option<String>) {
        self.draft.category_id = category_id;
        self.draft.subcategory_ids.clear();
        self.clear_error_if_filled("category", FieldValue::Select(self.draft.category_id.clone()));
    }

    /// Replace the subcategory selection; an empty selection is flagged
    /// immediately, the control validates on every change
    pub fn select_subcategories(&mut self, ids: Vec<String>) {
        self.draft.subcategory_ids = ids;

        if self.draft.subcategory_ids.is_empty() {
            self.field_errors
                .insert("subcategories", "Selection is required".to_string());
        } else {
            self.field_errors.remove("subcategories");
        }
    }

    /// Set the release date; re-derives the discount lower bound and
    /// re-validates a present discount date against it
    pub fn set_release_date(&mut self, date: Option<NaiveDate>) {
        self.draft.release_date = date;
        self.min_discount_date = date;
        self.clear_error_if_filled("release_date", FieldValue::Date(self.draft.release_date));

        if let Some(release) = date {
            if release > self.max_date {
                self.field_errors
                    .insert("release_date", "Release date cannot be in the future".to_string());
            }
        }

        self.revalidate_discount_date();
    }

    pub fn set_discount_date(&mut self, date: Option<NaiveDate>) {
        self.draft.discount_date = date;
        self.revalidate_discount_date();
    }

    fn revalidate_discount_date(&mut self) {
        let Some(discount) = self.draft.discount_date else {
            self.field_errors.remove("discount_date");
            return;
        };

        if let Some(min) = self.min_discount_date {
            if discount < min {
                self.field_errors.insert(
                    "discount_date",
                    "Discount date must not precede the release date".to_string(),
                );
                return;
            }
        }

        if discount > self.max_date {
            self.field_errors
                .insert("discount_date", "Discount date cannot be in the future".to_string());
            return;
        }

        self.field_errors.remove("discount_date");
    }

    fn clear_error_if_filled(&mut self, name: &'static str, value: FieldValue) {
        if !value.is_empty() {
            self.field_errors.remove(name);
        }
    }

    // ========== Supplier relation deltas ==========

    /// Suppliers currently shown for the product: committed links minus
    /// pending removals, plus pending additions
    pub fn current_suppliers(&self) -> Vec<Supplier> {
        let mut suppliers: Vec<Supplier> = self
            .original
            .as_ref()
            .map(|details| {
                details
                    .suppliers
                    .iter()
                    .filter(|supplier| !self.suppliers_to_remove.contains(&supplier.id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        suppliers.extend(self.suppliers_to_add.iter().cloned());
        suppliers
    }

    /// Candidates for the select-suppliers dialog: everything not already
    /// linked or pending
    pub fn candidate_suppliers(&self, all: &[Supplier]) -> Vec<Supplier> {
        let current: Vec<String> = self
            .current_suppliers()
            .into_iter()
            .map(|supplier| supplier.id)
            .collect();

        all.iter()
            .filter(|supplier| !current.contains(&supplier.id))
            .cloned()
            .collect()
    }

    /// Candidates whose name contains the query, case-insensitive
    pub fn search_suppliers(&self, all: &[Supplier], query: &str) -> Vec<Supplier> {
        let candidates = self.candidate_suppliers(all);
        if query.is_empty() {
            return candidates;
        }

        let query = query.to_lowercase();
        candidates
            .into_iter()
            .filter(|supplier| supplier.name.to_lowercase().contains(&query))
            .collect()
    }

    /// Mark a supplier for linkage.
    ///
    /// Re-adding a supplier whose removal is pending cancels the removal;
    /// suppliers already linked or already pending are skipped.
    pub fn add_supplier(&mut self, supplier: Supplier) {
        if let Some(index) = self
            .suppliers_to_remove
            .iter()
            .position(|id| *id == supplier.id)
        {
            self.suppliers_to_remove.remove(index);
            return;
        }

        let already_linked = self.original.as_ref().map_or(false, |details| {
            details.suppliers.iter().any(|s| s.id == supplier.id)
        });
        let already_pending = self.suppliers_to_add.iter().any(|s| s.id == supplier.id);

        if !already_linked && !already_pending {
            self.suppliers_to_add.push(supplier);
        }
    }

    /// Mark a supplier relation for removal.
    ///
    /// Removing a pending-add cancels the pending add instead of recording
    /// a removal; recording the same removal twice nets to one.
    pub fn remove_supplier(&mut self, supplier_id: &str) {
        if let Some(index) = self
            .suppliers_to_add
            .iter()
            .position(|supplier| supplier.id == supplier_id)
        {
            self.suppliers_to_add.remove(index);
            return;
        }

        let linked = self.original.as_ref().map_or(false, |details| {
            details.suppliers.iter().any(|s| s.id == supplier_id)
        });

        if linked && !self.suppliers_to_remove.iter().any(|id| id.as_str() == supplier_id) {
            self.suppliers_to_remove.push(supplier_id.to_string());
        }
    }

    pub fn suppliers_to_add(&self) -> &[Supplier] {
        &self.suppliers_to_add
    }

    pub fn suppliers_to_remove(&self) -> &[String] {
        &self.suppliers_to_remove
    }

    // ========== Validation ==========

    fn form_fields(&self) -> Vec<FormField> {
        vec![
            FormField::required("name", FieldValue::Text(self.draft.name.clone())),
            FormField::new("description", FieldValue::Text(self.draft.description.clone())),
            FormField::required("category", FieldValue::Select(self.draft.category_id.clone())),
            FormField::required(
                "subcategories",
                FieldValue::MultiSelect(self.draft.subcategory_ids.clone()),
            ),
            FormField::required("release_date", FieldValue::Date(self.draft.release_date)),
            FormField::new("discount_date", FieldValue::Date(self.draft.discount_date)),
            FormField::required(
                "price",
                FieldValue::Text(self.draft.price_cents.map(|c| c.to_string())),
            ),
        ]
    }

    /// The strong check: required-field scan over the product field group.
    ///
    /// Flags every required-but-empty field; existing field errors (such as
    /// a discount date below its bound) keep the form invalid too.
    pub fn validate(&mut self) -> bool {
        for name in missing_required(&self.form_fields()) {
            self.field_errors
                .entry(name)
                .or_insert_with(|| "Field is required".to_string());
        }

        self.field_errors.is_empty()
    }

    // ========== Save / cancel ==========

    /// Reconcile the draft and relation deltas through the backend.
    ///
    /// Update path: one change set with the scalar diff and every link/
    /// unlink. Create path: submit the product first, then its relations
    /// referencing the assigned id. On failure the session stays in
    /// Editing with the draft preserved, the call is retryable.
    pub async fn save(&mut self, backend: &dyn CatalogBackend) -> Result<String, SessionError> {
        match self.state {
            SessionState::Saving => return Err(SessionError::SaveInFlight),
            SessionState::Editing => {}
            _ => return Err(SessionError::NotEditing),
        }

        if !self.validate() {
            return Err(SessionError::Invalid);
        }

        self.state = SessionState::Saving;

        let result = if self.product_id.is_none() {
            self.save_create(backend).await
        } else {
            self.save_update(backend).await
        };

        match result {
            Ok(id) => {
                self.suppliers_to_add.clear();
                self.suppliers_to_remove.clear();
                self.create_mode = false;
                self.state = SessionState::Viewing;

                // Refresh the read view so a later edit drafts from the
                // committed state; a failed refresh keeps the stale copy
                match backend.fetch_product(&id).await {
                    Ok(details) => {
                        self.draft = ProductDraft::from_product(&details.product);
                        self.original = Some(details);
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "Read refresh after save failed");
                    }
                }

                tracing::debug!(product_id = %id, "Product saved");
                Ok(id)
            }
            Err(err) => {
                self.state = SessionState::Editing;
                tracing::error!(error = %err, "Product save failed");
                Err(err)
            }
        }
    }

    async fn save_create(&mut self, backend: &dyn CatalogBackend) -> Result<String, SessionError> {
        let payload = self.draft.to_create().ok_or(SessionError::Invalid)?;

        let mut batch = ChangeSet::new(SAVE_PRODUCT_GROUP);
        batch.push(ChangeOp::CreateProduct(payload));

        let outcome = backend.submit(batch).await?;
        let id = outcome.created_product_id.ok_or_else(|| {
            SessionError::Backend(AppError::Service(
                "create outcome carried no product id".to_string(),
            ))
        })?;

        // The product exists from here on; a relation failure below leaves
        // a retryable session pointed at the created id
        self.product_id = Some(id.clone());

        let mut relations = ChangeSet::new(PRODUCT_RELATIONS_GROUP);
        for subcategory_id in &self.draft.subcategory_ids {
            relations.push(ChangeOp::LinkSubcategory {
                product_id: id.clone(),
                subcategory_id: subcategory_id.clone(),
            });
        }
        for supplier in &self.suppliers_to_add {
            relations.push(ChangeOp::LinkSupplier {
                product_id: id.clone(),
                supplier_id: supplier.id.clone(),
            });
        }

        if !relations.is_empty() {
            backend.submit(relations).await?;
        }

        Ok(id)
    }

    async fn save_update(&mut self, backend: &dyn CatalogBackend) -> Result<String, SessionError> {
        let id = self.product_id.clone().ok_or(SessionError::NoProduct)?;

        let mut batch = ChangeSet::new(SAVE_PRODUCT_GROUP);

        if let Some(original) = &self.original {
            let changes = self.draft.diff(&original.product);
            if !changes.is_empty() {
                batch.push(ChangeOp::UpdateProduct {
                    id: id.clone(),
                    changes,
                });
            }
        }

        // Subcategory deltas: selection diffed against the committed links
        let committed: Vec<String> = self
            .original
            .as_ref()
            .map(|details| details.product.subcategory_ids.clone())
            .unwrap_or_default();

        for subcategory_id in &self.draft.subcategory_ids {
            if !committed.contains(subcategory_id) {
                batch.push(ChangeOp::LinkSubcategory {
                    product_id: id.clone(),
                    subcategory_id: subcategory_id.clone(),
                });
            }
        }
        for subcategory_id in &committed {
            if !self.draft.subcategory_ids.contains(subcategory_id) {
                batch.push(ChangeOp::UnlinkSubcategory {
                    product_id: id.clone(),
                    subcategory_id: subcategory_id.clone(),
                });
            }
        }

        // Supplier deltas
        for supplier in &self.suppliers_to_add {
            batch.push(ChangeOp::LinkSupplier {
                product_id: id.clone(),
                supplier_id: supplier.id.clone(),
            });
        }
        for supplier_id in &self.suppliers_to_remove {
            batch.push(ChangeOp::UnlinkSupplier {
                product_id: id.clone(),
                supplier_id: supplier_id.clone(),
            });
        }

        if !batch.is_empty() {
            backend.submit(batch).await?;
        }

        Ok(id)
    }

    /// Discard the draft and every pending delta.
    ///
    /// Create mode closes the session (nothing was persisted); edit mode
    /// reverts to viewing with the committed entity untouched. Ignored
    /// while a save is in flight.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Saving => Err(SessionError::SaveInFlight),
            SessionState::Editing => {
                self.suppliers_to_add.clear();
                self.suppliers_to_remove.clear();
                self.field_errors.clear();

                if self.create_mode {
                    self.state = SessionState::Closed;
                } else {
                    if let Some(original) = &self.original {
                        self.draft = ProductDraft::from_product(&original.product);
                    }
                    self.state = SessionState::Viewing;
                }

                Ok(())
            }
            _ => Err(SessionError::NotEditing),
        }
    }

    // ========== Comments / delete ==========

    /// Post a comment on the committed product, stamped with the author
    pub async fn post_comment(
        &self,
        backend: &dyn CatalogBackend,
        text: &str,
        author: &str,
    ) -> Result<(), SessionError> {
        let product_id = self.product_id.clone().ok_or(SessionError::NoProduct)?;

        let mut batch = ChangeSet::new(POST_COMMENT_GROUP);
        batch.push(ChangeOp::CreateComment(CommentCreate {
            product_id,
            text: text.to_string(),
            author: author.to_string(),
        }));

        backend.submit(batch).await?;
        Ok(())
    }

    /// Delete the committed product, gated on the user's confirmation.
    ///
    /// Returns whether the delete was carried out.
    pub async fn delete(
        &self,
        backend: &dyn CatalogBackend,
        confirmed: bool,
    ) -> Result<bool, SessionError> {
        let product_id = self.product_id.clone().ok_or(SessionError::NoProduct)?;

        if !confirmed {
            return Ok(false);
        }

        let mut batch = ChangeSet::new(DELETE_PRODUCTS_GROUP);
        batch.push(ChangeOp::DeleteProducts {
            ids: vec![product_id],
        });

        backend.submit(batch).await?;
        Ok(true)
    }
}
