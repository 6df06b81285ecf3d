//! File-level conversion driver.
//!
//! [`Converter`] resolves the reader and writer for a pair of paths through the
//! registry, then runs read → IR → write. Each call owns its Document from
//! start to finish; the converter itself holds nothing but the registry.

use crate::error::FormatError;
use crate::format::SerializeOptions;
use crate::ir::Document;
use crate::registry::FormatRegistry;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Outcome of a successful [`Converter::convert`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub source_format: String,
    pub target_format: String,
    pub elements: usize,
    pub bytes_written: usize,
}

#[derive(Default)]
pub struct Converter {
    registry: FormatRegistry,
}

impl Converter {
    pub fn new(registry: FormatRegistry) -> Self {
        Converter { registry }
    }

    pub fn registry(&self) -> &FormatRegistry {
        &self.registry
    }

    /// Read and parse `path`. The document title is the file stem.
    pub fn read_document(&self, path: &Path) -> Result<Document, FormatError> {
        if !path.exists() {
            return Err(FormatError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let reader = self.registry.reader_for(path)?;

        let bytes = fs::read(path).map_err(|e| {
            FormatError::parse_failure(format!("Error reading {}", path.display()), e)
        })?;
        let mut doc = reader.parse_bytes(&bytes)?;
        doc.title = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned());

        debug!(path = %path.display(), format = reader.name(), elements = doc.len(), "read document");
        Ok(doc)
    }

    /// Render `doc` with the writer for `path` and write it. Returns the number
    /// of bytes written.
    pub fn write_document(
        &self,
        doc: &Document,
        path: &Path,
        options: &SerializeOptions,
    ) -> Result<usize, FormatError> {
        let writer = self.registry.writer_for(path)?;
        let bytes = writer.serialize_with_options(doc, options)?.into_bytes();

        fs::write(path, &bytes).map_err(|e| {
            FormatError::render_failure(format!("Error writing to file {}", path.display()), e)
        })?;

        debug!(path = %path.display(), format = writer.name(), bytes = bytes.len(), "wrote document");
        Ok(bytes.len())
    }

    /// Convert `input` into `output`, choosing formats by extension.
    ///
    /// Both formats are resolved before anything is read, so an unsupported
    /// output fails without touching the input.
    pub fn convert(
        &self,
        input: &Path,
        output: &Path,
        options: &SerializeOptions,
    ) -> Result<ConversionReport, FormatError> {
        if !input.exists() {
            return Err(FormatError::NotFound {
                path: input.to_path_buf(),
            });
        }
        let source_format = self.registry.reader_for(input)?.name().to_string();
        let target_format = self.registry.writer_for(output)?.name().to_string();

        let doc = self.read_document(input)?;
        let bytes_written = self.write_document(&doc, output, options)?;

        info!(
            input = %input.display(),
            output = %output.display(),
            source = %source_format,
            target = %target_format,
            bytes = bytes_written,
            "converted"
        );

        Ok(ConversionReport {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            source_format,
            target_format,
            elements: doc.len(),
            bytes_written,
        })
    }

    /// Read `input` and render it as text with the format named `target`.
    ///
    /// Binary targets yield their structural summary.
    pub fn convert_to_string(&self, input: &Path, target: &str) -> Result<String, FormatError> {
        let doc = self.read_document(input)?;
        self.registry.serialize(&doc, target)
    }
}
