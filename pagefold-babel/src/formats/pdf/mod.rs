//! PDF format implementation
//!
//! Both directions go through `lopdf`:
//!
//! - Import extracts the plain text of every page and classifies each line as a
//!   heading or paragraph ([`reader`]). Lists and code blocks are not recovered.
//! - Export lays the document out with the standard Helvetica and Courier fonts
//!   and stamps a footer on every page ([`writer`]).
//!
//! `serialize` has no meaningful text form for a PDF and returns the document's
//! structural summary instead.

pub mod fonts;
pub mod reader;
pub mod writer;

use crate::error::FormatError;
use crate::format::{Format, SerializeOptions, SerializedDocument};
use crate::ir::Document;

pub use reader::{read_pages, LopdfPages, PageSource};
pub use writer::render_pdf;

/// Format implementation for PDF
#[derive(Default)]
pub struct PdfFormat;

impl PdfFormat {
    pub fn new() -> Self {
        PdfFormat
    }
}

impl Format for PdfFormat {
    fn name(&self) -> &str {
        "pdf"
    }

    fn description(&self) -> &str {
        "Portable Document Format (text extraction and paginated export)"
    }

    fn file_extensions(&self) -> &[&str] {
        &[".pdf"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        self.parse_bytes(source.as_bytes())
    }

    fn parse_bytes(&self, bytes: &[u8]) -> Result<Document, FormatError> {
        let pages = LopdfPages::from_bytes(bytes)?;
        read_pages(&pages)
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
        render_pdf(doc, options, now).map(SerializedDocument::Binary)
    }
}
