//! Catalog Desk - 商品目录管理客户端核心
//!
//! 包含核心组件:
//! - Store / CatalogStores: 本地内存数据集合（按 id 寻址）
//! - LocalBackend: 将变更集原子地应用到本地存储
//! - EditSession: 商品编辑会话（草稿、关系增量、校验、保存/取消）
//! - FilterBar / ProductTable: 列表过滤、排序、分组、选择保持
//! - SupplierForm: 供应商创建子流程（级联地理选择）

pub mod constants;
pub mod fields;
pub mod filters;
pub mod session;
pub mod store;
pub mod table;
pub mod utils;

pub use filters::{FilterBar, Grouping, Sorter};
pub use session::{EditSession, SessionError, SupplierForm};
pub use store::{CatalogStores, Entity, LocalBackend, Store};
pub use table::ProductTable;
