use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Todo validation failed: {field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

/// Every failure the todo accessor can surface.
#[derive(Debug, Error)]
pub enum TodoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Invalid ID format")]
    InvalidIdentifier(String),
    #[error("Todo not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}
