//! 编辑会话管理
//!
//! 商品的创建/编辑草稿、供应商子流程，以及两者共用的会话错误类型。

mod draft;
mod edit_session;
mod supplier_form;

pub use draft::ProductDraft;
pub use edit_session::{EditSession, SessionState};
pub use supplier_form::{is_valid_zip_code, SupplierForm};

use thiserror::Error;

/// Edit-session error type
#[derive(Debug, Error)]
pub enum SessionError {
    /// Required-field validation failed, save is blocked
    #[error("Form validation failed")]
    Invalid,

    /// A save is already in flight, the request is ignored
    #[error("A save is already in flight")]
    SaveInFlight,

    /// The session is not in edit mode
    #[error("Session is not in edit mode")]
    NotEditing,

    /// The session has no committed product to act on
    #[error("Session has no committed product")]
    NoProduct,

    /// The backend rejected the submission, the draft is preserved
    #[error(transparent)]
    Backend(#[from] shared::AppError),
}
