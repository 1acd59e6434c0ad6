//! Catalog backend abstraction
//!
//! [`CatalogBackend`] is the CRUD+batch contract the client state layers
//! depend on. [`RemoteBackend`] implements it against the catalog REST API;
//! an in-memory implementation lives with the local store.

use async_trait::async_trait;
use urlencoding::encode;

use shared::changes::{ChangeSet, SubmitOutcome};
use shared::error::{AppError, AppResult};
use shared::models::{Category, Product, ProductDetails, Subcategory, Supplier};

use crate::{ClientError, HttpClient};

/// CRUD+batch contract of the catalog service
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    /// List all products (relations collapsed to id lists)
    async fn list_products(&self) -> AppResult<Vec<Product>>;

    /// Read one product with expanded category, subcategories, suppliers
    /// and comments
    async fn fetch_product(&self, id: &str) -> AppResult<ProductDetails>;

    /// List all categories
    async fn list_categories(&self) -> AppResult<Vec<Category>>;

    /// List subcategories of one category
    async fn list_subcategories(&self, category_id: &str) -> AppResult<Vec<Subcategory>>;

    /// List all supplier master records
    async fn list_suppliers(&self) -> AppResult<Vec<Supplier>>;

    /// Apply a change set atomically
    async fn submit(&self, batch: ChangeSet) -> AppResult<SubmitOutcome>;
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotFound(msg) => AppError::NotFound {
                entity: "Resource",
                id: msg,
            },
            ClientError::Validation(msg) => AppError::Validation(msg),
            other => AppError::Service(other.to_string()),
        }
    }
}

/// Backend implementation over the catalog REST API
#[derive(Debug, Clone)]
pub struct RemoteBackend {
    http: HttpClient,
}

impl RemoteBackend {
    /// Create a remote backend over an HTTP client
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl CatalogBackend for RemoteBackend {
    async fn list_products(&self) -> AppResult<Vec<Product>> {
        Ok(self.http.get("/api/products").await?)
    }

    async fn fetch_product(&self, id: &str) -> AppResult<ProductDetails> {
        let path = format!(
            "/api/products/{}?expand=category,subcategories,suppliers,comments",
            encode(id)
        );
        Ok(self.http.get(&path).await?)
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        Ok(self.http.get("/api/categories").await?)
    }

    async fn list_subcategories(&self, category_id: &str) -> AppResult<Vec<Subcategory>> {
        let path = format!("/api/categories/{}/subcategories", encode(category_id));
        Ok(self.http.get(&path).await?)
    }

    async fn list_suppliers(&self) -> AppResult<Vec<Supplier>> {
        Ok(self.http.get("/api/suppliers").await?)
    }

    async fn submit(&self, batch: ChangeSet) -> AppResult<SubmitOutcome> {
        tracing::debug!(group = %batch.group, ops = batch.len(), "Submitting change set");

        let outcome: SubmitOutcome = self.http.post("/api/batch", &batch).await?;
        Ok(outcome)
    }
}
