//! DOCX format implementation (export only)
//!
//! | IR Element | DOCX                                             |
//! |------------|--------------------------------------------------|
//! | Title      | `Title` paragraph style                          |
//! | Heading    | `Heading1`…`Heading9`, level clamped to 1-9      |
//! | Paragraph  | `Normal` paragraph                               |
//! | List       | Indented paragraphs with `•` / `N.` prefixes      |
//! | CodeBlock  | `Code` style (Courier New), lines split by breaks |
//!
//! Footers come from the footer policy for pages 1 and 2; `{page}` is emitted as
//! a `PAGE` field so Word numbers every page itself.

pub mod writer;

use crate::error::FormatError;
use crate::format::{Format, SerializeOptions, SerializedDocument};
use crate::ir::Document;

pub use writer::{build_parts, render_docx, Part};

/// Format implementation for DOCX
#[derive(Default)]
pub struct DocxFormat;

impl DocxFormat {
    pub fn new() -> Self {
        DocxFormat
    }
}

impl Format for DocxFormat {
    fn name(&self) -> &str {
        "docx"
    }

    fn description(&self) -> &str {
        "Office Open XML word-processing document (export only)"
    }

    fn file_extensions(&self) -> &[&str] {
        &[".docx"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(doc.summary())
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &SerializeOptions,
    ) -> Result<SerializedDocument, FormatError> {
        let now = chrono::Local::now().naive_local();
        render_docx(doc, options, now).map(SerializedDocument::Binary)
    }
}
