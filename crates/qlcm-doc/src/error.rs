/// Errors from loading a workspace document.
#[derive(Debug, thiserror::Error)]
pub enum DocError {
    /// The file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The content is not well-formed XML.
    #[error("{0}")]
    InvalidXml(#[from] roxmltree::Error),

    /// No `Engine` element exists beneath the document root.
    #[error("no function container found")]
    ContainerNotFound,

    /// The container holds no `Function` elements.
    #[error("no functions found under the container")]
    NoFunctions,
}

impl DocError {
    /// Returns `true` for errors about document structure rather than syntax or I/O.
    pub fn is_structural(&self) -> bool {
        matches!(self, DocError::ContainerNotFound | DocError::NoFunctions)
    }
}

/// Result alias for document operations.
pub type DocResult<T> = Result<T, DocError>;
