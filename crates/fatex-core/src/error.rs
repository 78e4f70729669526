//! Error types for the fatex-core library.

use thiserror::Error;

/// Main error type for the fatex library.
#[derive(Error, Debug)]
pub enum FatexError {
    /// Document parsing error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning raw bytes into a document tree, or while
/// navigating it. Always fatal for the whole document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The input cannot be parsed into a tree at all.
    #[error("malformed XML document: {0}")]
    Malformed(String),

    /// The input is not valid UTF-8.
    #[error("document is not valid UTF-8: {0}")]
    Encoding(String),

    /// A path resolved to a value of the wrong cardinality or type,
    /// e.g. a repeating group where a single scalar was expected.
    #[error("unexpected shape at {path}: expected {expected}")]
    UnexpectedShape {
        path: String,
        expected: &'static str,
    },

    /// The document has no root element.
    #[error("document has no root element")]
    NoRoot,
}

impl From<quick_xml::Error> for DocumentError {
    fn from(err: quick_xml::Error) -> Self {
        DocumentError::Malformed(err.to_string())
    }
}

/// Errors raised while building flat records from extracted fields.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A numeric field's extracted-or-defaulted string is not a number.
    #[error("cannot coerce {field} to a number: {value:?}")]
    Coercion { field: &'static str, value: String },
}

/// Result type for the fatex library.
pub type Result<T> = std::result::Result<T, FatexError>;
