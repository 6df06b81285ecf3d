//! Markdown format implementation
//!
//! This module implements bidirectional conversion between Markdown and the
//! pagefold IR. Both directions are hand-written against a deliberately small
//! grammar:
//!
//! | IR Element  | Markdown Equivalent   | Export Notes                      | Import Notes                         |
//! |-------------|-----------------------|-----------------------------------|--------------------------------------|
//! | Heading     | `#` … `######`        | Level clamped to 1-6              | ATX only, level = count of `#`       |
//! | Paragraph   | Paragraph             | Content verbatim                  | Lines joined, whitespace collapsed   |
//! | List        | `-` / `1.` items      | Two spaces per nesting level      | `*`, `-`, `+`, `N.`; kind from first |
//! | ListItem    | List item             | Nested lists follow the item line | Deeper items nest under previous one |
//! | CodeBlock   | Fenced block (```)    | Language → info string            | Info string → language               |
//! | Inline spans| Plain text            | Content only                      | Not produced                         |
//!
//! # Lossy Conversions
//!
//! - Setext headings, tables, block quotes and emphasis are read as plain text
//! - Ordered lists are renumbered from 1 on export
//! - Paragraph line breaks and runs of whitespace are collapsed
//! - Document titles are exported as a leading level-1 heading

pub mod parser;
pub mod serializer;

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::Document;

/// Format implementation for Markdown
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Markdown (ATX headings, fenced code, nested lists)"
    }

    fn file_extensions(&self) -> &[&str] {
        &[".md", ".markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        let mut doc = parser::parse_from_markdown(source);
        doc.metadata
            .insert("source_format".to_string(), "markdown".to_string());
        Ok(doc)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(serializer::serialize_to_markdown(doc))
    }
}
