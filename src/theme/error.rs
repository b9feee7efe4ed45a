//! Theme engine error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThemeError {
    /// Template override directory does not exist
    #[error("Template directory not found: {0}")]
    NotFound(String),

    /// Template parsing or rendering error
    #[error("Template error: {0}")]
    TemplateError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
