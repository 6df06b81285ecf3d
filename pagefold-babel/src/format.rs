//! Format trait definition
//!
//! This module defines the core Format trait that all format implementations must implement.
//! The trait provides a uniform interface for parsing and serializing documents.

use crate::error::FormatError;
use crate::footer::FooterConfig;
use crate::ir::Document;
use std::path::Path;
use std::str::FromStr;

/// Serialized output produced by a [`Format`] implementation.
#[derive(Debug)]
pub enum SerializedDocument {
    /// UTF-8 text output (e.g., markdown)
    Text(String),
    /// Binary output (e.g., PDF, DOCX)
    Binary(Vec<u8>),
}

impl SerializedDocument {
    /// Consume the serialized output and return the underlying bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            SerializedDocument::Text(text) => text.into_bytes(),
            SerializedDocument::Binary(bytes) => bytes,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SerializedDocument::Text(text) => text.len(),
            SerializedDocument::Binary(bytes) => bytes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Physical page size for paginated outputs, in PDF points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    #[default]
    Letter,
    A4,
}

impl PageSize {
    /// Width and height in points (1/72 inch).
    pub fn points(&self) -> (f32, f32) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.28, 841.89),
        }
    }

    /// Width and height in twentieths of a point, as OOXML expects.
    pub fn twips(&self) -> (u32, u32) {
        match self {
            PageSize::Letter => (12240, 15840),
            PageSize::A4 => (11906, 16838),
        }
    }
}

impl FromStr for PageSize {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "letter" => Ok(PageSize::Letter),
            "a4" => Ok(PageSize::A4),
            other => Err(FormatError::NotSupported(format!(
                "Unknown page size '{other}' (expected 'letter' or 'a4')"
            ))),
        }
    }
}

/// Parameters for paginated writers.
#[derive(Debug, Clone, Default)]
pub struct SerializeOptions {
    pub footer: FooterConfig,
    pub page_size: PageSize,
}

/// Trait for document formats
///
/// Implementors provide conversion between a file representation and the
/// Document IR. Formats can support parsing, serialization, or both.
///
/// # Examples
///
/// ```ignore
/// struct MyFormat;
///
/// impl Format for MyFormat {
///     fn name(&self) -> &str {
///         "my-format"
///     }
///
///     fn file_extensions(&self) -> &[&str] {
///         &[".my"]
///     }
///
///     fn supports_parsing(&self) -> bool {
///         true
///     }
///
///     fn parse(&self, source: &str) -> Result<Document, FormatError> {
///         todo!()
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "markdown", "pdf")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions associated with this format (e.g., [".md", ".markdown"])
    ///
    /// Lower-case, including the leading dot.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Whether this format supports parsing (source → Document)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Whether this format supports serialization (Document → source)
    fn supports_serialization(&self) -> bool {
        false
    }

    /// Whether the concrete path carries one of this format's extensions.
    fn supports_path(&self, path: &Path) -> bool {
        extension_of(path).is_some_and(|ext| self.file_extensions().contains(&ext.as_str()))
    }

    /// Parse source text into a Document
    ///
    /// Default implementation returns NotSupported error.
    fn parse(&self, _source: &str) -> Result<Document, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support parsing",
            self.name()
        )))
    }

    /// Parse raw file contents into a Document
    ///
    /// Text formats rely on the default, which decodes UTF-8 and delegates to
    /// [`Format::parse`]. Binary formats override this method.
    fn parse_bytes(&self, bytes: &[u8]) -> Result<Document, FormatError> {
        let source = std::str::from_utf8(bytes)
            .map_err(|e| FormatError::parse_failure("input is not valid UTF-8", e))?;
        self.parse(source)
    }

    /// Serialize a Document into text
    ///
    /// Default implementation returns NotSupported error.
    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(FormatError::NotSupported(format!(
            "Format '{}' does not support serialization",
            self.name()
        )))
    }

    /// Serialize a Document for writing to disk.
    ///
    /// Formats that only emit textual output can rely on the default implementation,
    /// which delegates to [`Format::serialize`]. Binary formats should override this
    /// method to return [`SerializedDocument::Binary`].
    fn serialize_with_options(
        &self,
        doc: &Document,
        _options: &SerializeOptions,
    ) -> Result<SerializedDocument, FormatError> {
        self.serialize(doc).map(SerializedDocument::Text)
    }
}

/// Lower-cased extension of `path` including the leading dot.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
}

/// Normalise a user-supplied extension (`MD`, `.md`) to registry form (`.md`).
pub fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}
