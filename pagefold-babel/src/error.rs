//! Error types for format operations

use std::path::PathBuf;
use thiserror::Error;

/// Boxed underlying cause carried by parse and render failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur during format operations
#[derive(Debug, Error)]
pub enum FormatError {
    /// Source path does not exist
    #[error("Input file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Extension absent from the registry, or a reader/writer declined the path
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Format name not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),

    /// Format does not support the requested operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),

    /// Unexpected condition while tokenizing or building the element tree
    #[error("Parse error: {context}: {source}")]
    ParseFailure {
        context: String,
        #[source]
        source: BoxError,
    },

    /// Write-side IO or document construction failure
    #[error("Render error: {context}: {source}")]
    RenderFailure {
        context: String,
        #[source]
        source: BoxError,
    },

    #[error(transparent)]
    Footer(#[from] FooterError),
}

impl FormatError {
    pub fn parse_failure(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        FormatError::ParseFailure {
            context: context.into(),
            source: source.into(),
        }
    }

    pub fn render_failure(context: impl Into<String>, source: impl Into<BoxError>) -> Self {
        FormatError::RenderFailure {
            context: context.into(),
            source: source.into(),
        }
    }
}

/// Errors raised by the footer policy
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FooterError {
    /// Layout is neither `single` nor `double`
    #[error("Invalid layout: {0}. Must be 'single' or 'double'")]
    InvalidLayout(String),

    /// Template contains unbalanced or unterminated braces
    #[error("Malformed footer template '{template}': {reason}")]
    Template { template: String, reason: String },

    /// Date format specifier could not be rendered
    #[error("Invalid date format '{0}'")]
    DateFormat(String),
}
