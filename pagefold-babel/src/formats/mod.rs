//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the pagefold IR and concrete file formats.

pub mod docx;
pub mod markdown;
pub mod pdf;

pub use docx::DocxFormat;
pub use markdown::MarkdownFormat;
pub use pdf::PdfFormat;
