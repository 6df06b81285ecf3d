//! PDF text import (PDF → IR)
//!
//! PDFs carry no structural markup we can rely on, so import works on the
//! plain text of each page: every non-blank line becomes either a Heading or a
//! Paragraph, decided by a handful of typographic heuristics.

use crate::error::FormatError;
use crate::ir::Document;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Lines this long or longer are never headings.
const MAX_HEADING_CHARS: usize = 100;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static SENTENCE_GAP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([.!?])\s*([A-Z])").unwrap());
static CAPITALISED_NO_PERIOD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][^.]*[^.]$").unwrap());
static NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.?\s+[A-Z]").unwrap());
static NUMBER_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.?\s+").unwrap());

/// Page-level text access to a PDF.
pub trait PageSource {
    fn page_count(&self) -> usize;

    /// Plain text of the page at zero-based `index`.
    fn page_text(&self, index: usize) -> Result<String, FormatError>;
}

/// [`PageSource`] backed by an in-memory `lopdf` document.
pub struct LopdfPages {
    document: lopdf::Document,
    page_numbers: Vec<u32>,
}

impl LopdfPages {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FormatError> {
        let document = lopdf::Document::load_mem(bytes)
            .map_err(|e| FormatError::parse_failure("Error processing PDF", e.to_string()))?;
        let page_numbers = document.get_pages().keys().copied().collect();
        Ok(LopdfPages {
            document,
            page_numbers,
        })
    }
}

impl PageSource for LopdfPages {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&self, index: usize) -> Result<String, FormatError> {
        let number = self.page_numbers.get(index).copied().ok_or_else(|| {
            FormatError::parse_failure(
                "Error processing PDF",
                format!("page index {index} out of range"),
            )
        })?;
        self.document.extract_text(&[number]).map_err(|e| {
            FormatError::parse_failure(format!("Error extracting text from page {number}"), e.to_string())
        })
    }
}

/// Build a Document from every page of `source`, in page order.
pub fn read_pages(source: &dyn PageSource) -> Result<Document, FormatError> {
    let mut doc = Document::new();
    let pages = source.page_count();

    for index in 0..pages {
        let text = source.page_text(index)?;
        if text.trim().is_empty() {
            debug!(page = index + 1, "skipping blank page");
            continue;
        }
        append_page_text(&text, &mut doc);
    }

    doc.metadata
        .insert("source_format".to_string(), "pdf".to_string());
    doc.metadata
        .insert("page_count".to_string(), pages.to_string());
    debug!(pages, elements = doc.len(), "parsed pdf");
    Ok(doc)
}

fn append_page_text(text: &str, doc: &mut Document) {
    for line in text.lines() {
        let line = clean_text(line);
        if line.is_empty() {
            continue;
        }
        if is_heading(&line) {
            let level = heading_level(&line);
            doc.add_heading(heading_text(&line), level);
        } else {
            doc.add_paragraph(line);
        }
    }
}

/// Collapse whitespace and put a space after sentence punctuation.
pub(crate) fn clean_text(line: &str) -> String {
    let collapsed = WHITESPACE.replace_all(line, " ");
    SENTENCE_GAP
        .replace_all(&collapsed, "$1 $2")
        .trim()
        .to_string()
}

pub(crate) fn is_heading(line: &str) -> bool {
    line.chars().count() < MAX_HEADING_CHARS
        && (is_all_caps(line) || CAPITALISED_NO_PERIOD.is_match(line) || NUMBERED.is_match(line))
}

/// Numbered and plain capitalised headings are level 2; all-caps lines are 1.
pub(crate) fn heading_level(line: &str) -> usize {
    if NUMBER_PREFIX.is_match(line) {
        2
    } else if is_all_caps(line) {
        1
    } else {
        2
    }
}

fn heading_text(line: &str) -> String {
    if is_all_caps(line) {
        title_case(line)
    } else {
        line.to_string()
    }
}

/// At least one cased letter and no lower-case ones.
fn is_all_caps(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}

/// Upper-case the first letter of every word, lower-case the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
