//! Document conversion between Markdown, PDF and DOCX
//!
//!     This crate parses source documents into a format-agnostic intermediate representation
//!     (the IR, see ./ir/nodes.rs) and renders that representation into a target format.
//!
//!     This is a pure lib, that is, it powers pagefold-cli but is shell agnostic: no code here
//!     prints, reads env vars or prompts. It only emits `tracing` events and returns errors.
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # FormatError / FooterError
//!     ├── format.rs               # Format trait, SerializeOptions, PageSize
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── footer.rs               # Footer placement policy
//!     ├── convert.rs              # File-level read → IR → write driver
//!     ├── formats
//!     │   ├── markdown            # parser.rs + serializer.rs
//!     │   ├── pdf                 # reader.rs + writer.rs + fonts.rs (lopdf)
//!     │   └── docx                # writer.rs (zip + WordprocessingML)
//!     ├── ir                      # Intermediate Representation
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     ├── lib.rs                  # pulls in the per-area modules below
//!     ├── markdown
//!     ├── footer.rs
//!     ├── pdf.rs
//!     ├── docx.rs
//!     └── convert.rs
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include
//!     these in the mod.
//!
//! Core Algorithms
//!
//!     The Markdown parser is a single-pass line state machine (default / inside a fence) with one
//!     piece of lookahead: when it meets a list marker it hands the rest of the contiguous list to
//!     a recursive function that returns the list and the number of lines it consumed. Indentation
//!     deeper than the current level under an item becomes a child list of that item.
//!
//!     The renderer walks the same tree back out, two spaces per nesting level, numbering each
//!     ordered container from 1.
//!
//!     Paginated writers (PDF, DOCX) ask the footer policy for the (left, right) pair of every page.
//!     In the double-sided layout the pair swaps on even pages.
//!
//! Formats
//!
//!     Format specific capabilities are implemented with the Format trait (./format.rs): a name,
//!     file extensions, and parse() and/or serialize() methods. Binary writers override
//!     serialize_with_options(); their plain serialize() returns a structural summary.
//!
//!     | Format   | Read | Write |
//!     |----------|------|-------|
//!     | markdown | yes  | yes   |
//!     | pdf      | yes  | yes   |
//!     | docx     | no   | yes   |
//!
//!     PDF import is text extraction plus heuristics, so lists and code do not survive a trip
//!     through PDF.

pub mod convert;
pub mod error;
pub mod footer;
pub mod format;
pub mod formats;
pub mod ir;
pub mod registry;

pub use convert::{ConversionReport, Converter};
pub use error::{FooterError, FormatError};
pub use footer::{FooterConfig, FooterLayout};
pub use format::{Format, PageSize, SerializeOptions, SerializedDocument};
pub use ir::Document;
pub use registry::FormatRegistry;
