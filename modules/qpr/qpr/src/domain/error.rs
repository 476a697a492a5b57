/// Domain-level errors for the QPR module.
///
/// `NotFound` deliberately merges "does not exist" and "not owned by the
/// caller" so that cross-account probing cannot distinguish the two.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("authentication required")]
    Unauthenticated,

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("validation error on '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("database error: {0}")]
    Database(#[from] anyhow::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied(message.into())
    }
}
