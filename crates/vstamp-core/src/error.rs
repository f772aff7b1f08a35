//! Error types for vstamp.

use thiserror::Error;

/// Top-level result type for vstamp operations.
pub type Result<T> = std::result::Result<T, StampError>;

/// Top-level error type for vstamp.
///
/// Per-file variants never embed the file path in their message, so the
/// same failure on many files collapses into one line of the summary.
#[derive(Debug, Error)]
pub enum StampError {
    #[error("read error: {0}")]
    Read(#[source] std::io::Error),

    #[error("metadata lookup error: {0}")]
    MetadataLookup(#[source] std::io::Error),

    #[error("write error: {0}")]
    Write(#[source] std::io::Error),

    #[error(transparent)]
    Frontmatter(#[from] FrontmatterError),

    #[error("traversal error: {0}")]
    Traversal(String),
}

/// Errors raised while splitting, decoding, or re-encoding a frontmatter block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontmatterError {
    #[error("invalid frontmatter format: missing closing '---'")]
    MalformedBlock,

    #[error("invalid YAML in frontmatter: {0}")]
    InvalidEncoding(String),
}
