//! 本地内存数据存储
//!
//! 每个实体类型一个 [`Store`]，按 id 寻址。存储实例由应用根节点显式构造并
//! 注入使用方，不存在模块级单例。

mod local_backend;
mod store;

pub use local_backend::LocalBackend;
pub use store::{Entity, Store};

use shared::models::{
    Category, Comment, Product, ProductSubcategory, ProductSupplier, Subcategory, Supplier, User,
};

/// All local collections, owned by the application composition root
#[derive(Debug, Clone)]
pub struct CatalogStores {
    pub products: Store<Product>,
    pub categories: Store<Category>,
    pub subcategories: Store<Subcategory>,
    pub suppliers: Store<Supplier>,
    pub comments: Store<Comment>,
    /// Product-subcategory membership rows
    pub product_subcategories: Vec<ProductSubcategory>,
    /// Product-supplier membership rows
    pub product_suppliers: Vec<ProductSupplier>,
    /// Current user, stamps comment authors
    pub current_user: User,
}

impl CatalogStores {
    /// Create empty stores with the given current user
    pub fn new(current_user: User) -> Self {
        Self {
            products: Store::new(),
            categories: Store::new(),
            subcategories: Store::new(),
            suppliers: Store::new(),
            comments: Store::new(),
            product_subcategories: Vec::new(),
            product_suppliers: Vec::new(),
            current_user,
        }
    }

    /// Subcategory ids linked to a product, in link order
    pub fn subcategory_ids_of(&self, product_id: &str) -> Vec<String> {
        self.product_subcategories
            .iter()
            .filter(|row| row.product_id == product_id)
            .map(|row| row.subcategory_id.clone())
            .collect()
    }

    /// Supplier ids linked to a product, in link order
    pub fn supplier_ids_of(&self, product_id: &str) -> Vec<String> {
        self.product_suppliers
            .iter()
            .filter(|row| row.product_id == product_id)
            .map(|row| row.supplier_id.clone())
            .collect()
    }

    /// Add a product-subcategory row; adding an existing membership is a no-op
    pub fn link_subcategory(&mut self, product_id: &str, subcategory_id: &str) {
        let exists = self
            .product_subcategories
            .iter()
            .any(|row| row.product_id == product_id && row.subcategory_id == subcategory_id);

        if !exists {
            self.product_subcategories.push(ProductSubcategory {
                product_id: product_id.to_string(),
                subcategory_id: subcategory_id.to_string(),
            });
        }
    }

    /// Remove a product-subcategory row; removing a missing one is a no-op
    pub fn unlink_subcategory(&mut self, product_id: &str, subcategory_id: &str) {
        self.product_subcategories
            .retain(|row| !(row.product_id == product_id && row.subcategory_id == subcategory_id));
    }

    /// Add a product-supplier row; adding an existing membership is a no-op
    pub fn link_supplier(&mut self, product_id: &str, supplier_id: &str) {
        let exists = self
            .product_suppliers
            .iter()
            .any(|row| row.product_id == product_id && row.supplier_id == supplier_id);

        if !exists {
            self.product_suppliers.push(ProductSupplier {
                product_id: product_id.to_string(),
                supplier_id: supplier_id.to_string(),
            });
        }
    }

    /// Remove a product-supplier row; removing a missing one is a no-op
    pub fn unlink_supplier(&mut self, product_id: &str, supplier_id: &str) {
        self.product_suppliers
            .retain(|row| !(row.product_id == product_id && row.supplier_id == supplier_id));
    }

    /// A product with membership id lists populated from the join rows
    pub fn product_with_relations(&self, product: &Product) -> Product {
        let mut product = product.clone();
        product.subcategory_ids = self.subcategory_ids_of(&product.id);
        product.supplier_ids = self.supplier_ids_of(&product.id);
        product
    }
}
