//! Local store backend
//!
//! 将变更集应用到内存存储。应用方式: 先在完整副本上逐条执行，全部成功后
//! 整体换入 —— 对调用方而言批次要么全部生效要么全部不生效。

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use catalog_client::CatalogBackend;
use shared::changes::{ChangeOp, ChangeSet, SubmitOutcome};
use shared::error::{AppError, AppResult};
use shared::models::{
    Category, Comment, Product, ProductDetails, Subcategory, Supplier,
};

use super::CatalogStores;

/// Backend implementation over the in-memory stores
#[derive(Clone)]
pub struct LocalBackend {
    stores: Arc<RwLock<CatalogStores>>,
}

impl LocalBackend {
    /// Create a backend over shared store state
    pub fn new(stores: Arc<RwLock<CatalogStores>>) -> Self {
        Self { stores }
    }

    /// Shared store state, for composition-root wiring
    pub fn stores(&self) -> Arc<RwLock<CatalogStores>> {
        Arc::clone(&self.stores)
    }

    /// Apply one operation to a staged copy of the stores
    fn apply_op(
        stage: &mut CatalogStores,
        op: ChangeOp,
        outcome: &mut SubmitOutcome,
    ) -> AppResult<()> {
        match op {
            ChangeOp::CreateProduct(payload) => {
                let product = Product {
                    id: String::new(),
                    name: payload.name,
                    description: payload.description,
                    rating: payload.rating,
                    release_date: payload.release_date,
                    discount_date: payload.discount_date,
                    price_cents: payload.price_cents,
                    image: payload.image,
                    category_id: payload.category_id,
                    subcategory_ids: Vec::new(),
                    supplier_ids: Vec::new(),
                };

                let created = stage.products.create(product);
                outcome.created_product_id = Some(created.id);
            }

            ChangeOp::UpdateProduct { id, changes } => {
                stage.products.update(&id, |product| {
                    if let Some(name) = changes.name {
                        product.name = name;
                    }
                    if let Some(description) = changes.description {
                        product.description = description;
                    }
                    if let Some(rating) = changes.rating {
                        product.rating = rating;
                    }
                    if let Some(release_date) = changes.release_date {
                        product.release_date = release_date;
                    }
                    if let Some(discount_date) = changes.discount_date {
                        product.discount_date = discount_date;
                    }
                    if let Some(price_cents) = changes.price_cents {
                        product.price_cents = price_cents;
                    }
                    if let Some(image) = changes.image {
                        product.image = image;
                    }
                    if let Some(category_id) = changes.category_id {
                        product.category_id = category_id;
                    }
                })?;
            }

            ChangeOp::DeleteProducts { ids } => {
                stage.products.delete(&ids);

                // Cascade: membership rows and comments of removed products
                stage
                    .product_subcategories
                    .retain(|row| !ids.contains(&row.product_id));
                stage
                    .product_suppliers
                    .retain(|row| !ids.contains(&row.product_id));
                let orphaned: Vec<String> = stage
                    .comments
                    .all()
                    .into_iter()
                    .filter(|comment| ids.contains(&comment.product_id))
                    .map(|comment| comment.id)
                    .collect();
                stage.comments.delete(&orphaned);
            }

            ChangeOp::CreateSupplier(payload) => {
                let supplier = Supplier {
                    id: String::new(),
                    name: payload.name,
                    country: payload.country,
                    state: payload.state,
                    city: payload.city,
                    street: payload.street,
                    zip_code: payload.zip_code,
                };

                let created = stage.suppliers.create(supplier);
                outcome.created_supplier = Some(created);
            }

            ChangeOp::CreateComment(payload) => {
                if !stage.products.contains(&payload.product_id) {
                    return Err(AppError::not_found("Product", payload.product_id));
                }

                let comment = Comment {
                    id: String::new(),
                    product_id: payload.product_id,
                    text: payload.text,
                    author: payload.author,
                    date: Utc::now(),
                };
                stage.comments.create(comment);
            }

            ChangeOp::LinkSubcategory {
                product_id,
                subcategory_id,
            } => {
                if !stage.products.contains(&product_id) {
                    return Err(AppError::not_found("Product", product_id));
                }
                if !stage.subcategories.contains(&subcategory_id) {
                    return Err(AppError::not_found("Subcategory", subcategory_id));
                }
                stage.link_subcategory(&product_id, &subcategory_id);
            }

            ChangeOp::UnlinkSubcategory {
                product_id,
                subcategory_id,
            } => {
                stage.unlink_subcategory(&product_id, &subcategory_id);
            }

            ChangeOp::LinkSupplier {
                product_id,
                supplier_id,
            } => {
                if !stage.products.contains(&product_id) {
                    return Err(AppError::not_found("Product", product_id));
                }
                if !stage.suppliers.contains(&supplier_id) {
                    return Err(AppError::not_found("Supplier", supplier_id));
                }
                stage.link_supplier(&product_id, &supplier_id);
            }

            ChangeOp::UnlinkSupplier {
                product_id,
                supplier_id,
            } => {
                stage.unlink_supplier(&product_id, &supplier_id);
            }
        }

        Ok(())
    }
}

#[async_trait]
impl CatalogBackend for LocalBackend {
    async fn list_products(&self) -> AppResult<Vec<Product>> {
        let stores = self.stores.read().await;
        Ok(stores
            .products
            .all()
            .iter()
            .map(|product| stores.product_with_relations(product))
            .collect())
    }

    async fn fetch_product(&self, id: &str) -> AppResult<ProductDetails> {
        let stores = self.stores.read().await;

        let product = stores
            .products
            .get(id)
            .ok_or_else(|| AppError::not_found("Product", id))?;
        let product = stores.product_with_relations(&product);

        let subcategories = stores
            .subcategories
            .expand_by_ids(&product.subcategory_ids)
            .into_iter()
            .flatten()
            .collect();
        let suppliers = stores
            .suppliers
            .expand_by_ids(&product.supplier_ids)
            .into_iter()
            .flatten()
            .collect();
        let comments = stores
            .comments
            .all()
            .into_iter()
            .filter(|comment| comment.product_id == product.id)
            .collect();

        Ok(ProductDetails {
            category: stores.categories.get(&product.category_id),
            product,
            subcategories,
            suppliers,
            comments,
        })
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        Ok(self.stores.read().await.categories.all())
    }

    async fn list_subcategories(&self, category_id: &str) -> AppResult<Vec<Subcategory>> {
        Ok(self
            .stores
            .read()
            .await
            .subcategories
            .all()
            .into_iter()
            .filter(|subcategory| subcategory.category_id == category_id)
            .collect())
    }

    async fn list_suppliers(&self) -> AppResult<Vec<Supplier>> {
        Ok(self.stores.read().await.suppliers.all())
    }

    async fn submit(&self, batch: ChangeSet) -> AppResult<SubmitOutcome> {
        let mut stores = self.stores.write().await;

        let mut stage = stores.clone();
        let mut outcome = SubmitOutcome::default();

        for op in batch.ops {
            Self::apply_op(&mut stage, op, &mut outcome)?;
            outcome.applied += 1;
        }

        tracing::debug!(group = %batch.group, applied = outcome.applied, "Change set applied");

        *stores = stage;
        Ok(outcome)
    }
}
