//! Entity models for the product catalog

mod category;
mod comment;
mod geo;
mod links;
mod product;
mod supplier;
mod user;

pub use category::{Category, Subcategory};
pub use comment::{Comment, CommentCreate};
pub use geo::{City, Country, CountryState};
pub use links::{ProductSubcategory, ProductSupplier};
pub use product::{Product, ProductCreate, ProductDetails, ProductUpdate};
pub use supplier::{Supplier, SupplierCreate};
pub use user::User;
