//! 列表过滤、排序、分组引擎

mod filter_bar;
mod ordering;

pub use filter_bar::{
    FilterBar, FIELD_CATEGORY, FIELD_NAME, FIELD_RELEASE_DATE, FIELD_SUBCATEGORIES,
    FIELD_SUPPLIERS,
};
pub use ordering::{order_products, GroupBucket, GroupKey, Grouping, SortField, Sorter};
