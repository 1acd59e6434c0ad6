//! Shared types for the product catalog client
//!
//! Common types used across the client crates: entity models, change-set
//! (batch) types, error types and id/time utilities.

pub mod changes;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use changes::{ChangeOp, ChangeSet, SubmitOutcome};
pub use error::{AppError, AppResult};
