//! Format registry for format discovery and selection
//!
//! This module provides a centralized registry for all available formats.
//! Formats can be registered and retrieved by name, or selected as a reader or
//! writer from a file extension (lower-cased, including the dot).

use crate::error::FormatError;
use crate::format::{
    extension_of, normalize_extension, Format, SerializeOptions, SerializedDocument,
};
use crate::ir::Document;
use std::collections::BTreeMap;
use std::path::Path;

/// Registry of document formats
///
/// Provides a centralized registry for all available formats.
/// The registry is filled once at startup and only read afterwards, so it can
/// be shared freely between concurrent conversions.
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::default();
///
/// let reader = registry.reader_for(Path::new("notes.md"))?;
/// let doc = reader.parse("# Notes")?;
/// ```
pub struct FormatRegistry {
    formats: BTreeMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: BTreeMap::new(),
        }
    }

    /// Register a format
    ///
    /// If a format with the same name already exists, it will be replaced.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    /// Get a format by name
    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        self.formats.keys().cloned().collect()
    }

    /// Detect format from filename based on file extension
    ///
    /// Returns the format name if a matching extension is found, or None otherwise.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = extension_of(Path::new(filename))?;
        self.formats
            .values()
            .find(|format| format.file_extensions().contains(&extension.as_str()))
            .map(|format| format.name().to_string())
    }

    /// Format that can parse files with extension `ext` (`"md"`, `".MD"` …).
    pub fn reader_for_extension(&self, ext: &str) -> Option<&dyn Format> {
        let ext = normalize_extension(ext);
        self.formats
            .values()
            .find(|f| f.supports_parsing() && f.file_extensions().contains(&ext.as_str()))
            .map(|f| f.as_ref())
    }

    /// Format that can write files with extension `ext`.
    pub fn writer_for_extension(&self, ext: &str) -> Option<&dyn Format> {
        let ext = normalize_extension(ext);
        self.formats
            .values()
            .find(|f| f.supports_serialization() && f.file_extensions().contains(&ext.as_str()))
            .map(|f| f.as_ref())
    }

    /// Reader for a concrete input path.
    pub fn reader_for(&self, path: &Path) -> Result<&dyn Format, FormatError> {
        let ext = extension_of(path).unwrap_or_default();
        self.reader_for_extension(&ext)
            .filter(|f| f.supports_path(path))
            .ok_or_else(|| {
                FormatError::UnsupportedFormat(format!("no reader for {}", display_ext(&ext)))
            })
    }

    /// Writer for a concrete output path.
    pub fn writer_for(&self, path: &Path) -> Result<&dyn Format, FormatError> {
        let ext = extension_of(path).unwrap_or_default();
        self.writer_for_extension(&ext)
            .filter(|f| f.supports_path(path))
            .ok_or_else(|| {
                FormatError::UnsupportedFormat(format!("no writer for {}", display_ext(&ext)))
            })
    }

    /// Every extension some registered format can parse, sorted.
    pub fn input_extensions(&self) -> Vec<String> {
        self.collect_extensions(|f| f.supports_parsing())
    }

    /// Every extension some registered format can write, sorted.
    pub fn output_extensions(&self) -> Vec<String> {
        self.collect_extensions(|f| f.supports_serialization())
    }

    fn collect_extensions(&self, keep: impl Fn(&dyn Format) -> bool) -> Vec<String> {
        let mut extensions: Vec<String> = self
            .formats
            .values()
            .filter(|f| keep(f.as_ref()))
            .flat_map(|f| f.file_extensions().iter().map(|e| e.to_string()))
            .collect();
        extensions.sort();
        extensions.dedup();
        extensions
    }

    /// Whether a file with `input_ext` can be converted to `output_ext`.
    pub fn is_conversion_supported(&self, input_ext: &str, output_ext: &str) -> bool {
        self.reader_for_extension(input_ext).is_some()
            && self.writer_for_extension(output_ext).is_some()
    }

    /// Parse source text using the specified format
    pub fn parse(&self, source: &str, format: &str) -> Result<Document, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support parsing"
            )));
        }
        fmt.parse(source)
    }

    /// Serialize a document using the specified format
    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_serialization() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support serialization"
            )));
        }
        fmt.serialize(doc)
    }

    /// Serialize a document using the specified format and options
    pub fn serialize_with_options(
        &self,
        doc: &Document,
        format: &str,
        options: &SerializeOptions,
    ) -> Result<SerializedDocument, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_serialization() {
            return Err(FormatError::NotSupported(format!(
                "Format '{format}' does not support serialization"
            )));
        }
        fmt.serialize_with_options(doc, options)
    }

    /// Create a registry with default formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::formats::markdown::MarkdownFormat);
        registry.register(crate::formats::pdf::PdfFormat::default());
        registry.register(crate::formats::docx::DocxFormat::default());

        registry
    }
}

fn display_ext(ext: &str) -> &str {
    if ext.is_empty() {
        "(no extension)"
    } else {
        ext
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
