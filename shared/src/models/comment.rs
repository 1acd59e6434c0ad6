//! Comment Model
//!
//! Comments are append-only from the client's perspective.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    /// Owning product reference (String ID)
    pub product_id: String,
    pub text: String,
    pub author: String,
    pub date: DateTime<Utc>,
}

/// Create comment payload, id and date are assigned at persistence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentCreate {
    pub product_id: String,
    pub text: String,
    pub author: String,
}
