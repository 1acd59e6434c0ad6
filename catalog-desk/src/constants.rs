//! Application constants

/// Change-set group for product create/update submissions
pub const SAVE_PRODUCT_GROUP: &str = "SaveProductGroup";

/// Change-set group for relation links issued after a product create
pub const PRODUCT_RELATIONS_GROUP: &str = "ProductRelationsGroup";

/// Change-set group for inline supplier creation
pub const CREATE_SUPPLIER_GROUP: &str = "CreateSupplierGroup";

/// Change-set group for confirmed product deletions
pub const DELETE_PRODUCTS_GROUP: &str = "DeleteProductsGroup";

/// Change-set group for posted comments
pub const POST_COMMENT_GROUP: &str = "PostCommentGroup";

/// A product counts as new for this many days after release
pub const AMOUNT_OF_DAYS_TO_BE_NEW: i64 = 7;
