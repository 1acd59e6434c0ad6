//! User Model

use serde::{Deserialize, Serialize};

/// Current user record, used to stamp comment authors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
}
