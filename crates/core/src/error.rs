use thiserror::Error;

/// Errors that can occur while searching for a move
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UctError {
    #[error("Invalid search state: {0}")]
    InvalidState(String),

    #[error("No legal move available")]
    NoLegalMove,
}

/// Convenience Result type for search operations
pub type Result<T> = std::result::Result<T, UctError>;
