//! Application error types

use thiserror::Error;

/// Application error type
#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// Entity with the given id does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflicting write (duplicate id, duplicate relation row)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Remote service failure
    #[error("Service error: {0}")]
    Service(String),
}

impl AppError {
    /// Create a not found error
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = AppError::not_found("Product", "1701388800000");
        assert_eq!(format!("{}", err), "Product not found: 1701388800000");
    }

    #[test]
    fn test_validation_display() {
        let err = AppError::validation("Name is required");
        assert_eq!(format!("{}", err), "Validation error: Name is required");
    }
}
