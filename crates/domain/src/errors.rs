use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Transient error: {message}")]
    Transient { message: String, retryable: bool },

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Player already drafted: {0}")]
    PlayerAlreadyDrafted(String),

    #[error("Pick deadline passed: {0}")]
    DeadlinePassed(String),

    #[error("Pick conflict: {0}")]
    PickConflict(String),
}

impl DomainError {
    pub fn transient(message: impl Into<String>) -> Self {
        DomainError::Transient {
            message: message.into(),
            retryable: true,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DomainError::Transient {
                retryable: true,
                ..
            }
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
