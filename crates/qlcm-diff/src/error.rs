//! Error types for the diff crate.

/// Errors that can occur while configuring a comparison.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DiffError {
    /// The preview window parameters are inconsistent.
    #[error("invalid preview configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
