//! File-level conversion tests

use crate::common::{docx_part, fixture_path, pdf_page_texts};
use pagefold_babel::{Converter, FormatError, SerializeOptions};
use std::fs;
use tempfile::TempDir;

fn write_input(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_markdown_to_pdf() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("kitchensink.pdf");

    let report = Converter::default()
        .convert(
            &fixture_path("kitchensink.md"),
            &output,
            &SerializeOptions::default(),
        )
        .unwrap();

    assert_eq!(report.source_format, "markdown");
    assert_eq!(report.target_format, "pdf");
    assert_eq!(report.elements, 10);
    let bytes = fs::read(&output).unwrap();
    assert_eq!(report.bytes_written, bytes.len());
    assert!(bytes.starts_with(b"%PDF-1.5"));

    // The file stem becomes the rendered title.
    let pages = pdf_page_texts(&bytes);
    assert_eq!(pages[0][0].text, "kitchensink");
}

#[test]
fn test_markdown_to_docx() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "notes.md", "# Notes\n\nHello there.\n");
    let output = dir.path().join("notes.docx");

    let report = Converter::default()
        .convert(&input, &output, &SerializeOptions::default())
        .unwrap();
    assert_eq!(report.target_format, "docx");

    let bytes = fs::read(&output).unwrap();
    let document = docx_part(&bytes, "word/document.xml").unwrap();
    assert!(document.contains("Hello there."));
    assert!(document.contains(r#"<w:pStyle w:val="Title"/>"#));
}

#[test]
fn test_markdown_to_markdown_adds_stem_title() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "draft.md", "Some text\n");
    let output = dir.path().join("copy.MD");

    Converter::default()
        .convert(&input, &output, &SerializeOptions::default())
        .unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), "# draft\n\nSome text\n");
}

#[test]
fn test_missing_input() {
    let dir = TempDir::new().unwrap();
    let err = Converter::default()
        .convert(
            &dir.path().join("absent.md"),
            &dir.path().join("out.pdf"),
            &SerializeOptions::default(),
        )
        .unwrap_err();
    assert!(matches!(err, FormatError::NotFound { .. }));
    assert!(err.to_string().contains("absent.md"));
}

#[test]
fn test_unsupported_input_extension() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "data.csv", "a,b\n");
    let output = dir.path().join("data.pdf");

    let err = Converter::default()
        .convert(&input, &output, &SerializeOptions::default())
        .unwrap_err();
    assert!(matches!(err, FormatError::UnsupportedFormat(_)), "{err:?}");
    assert!(!output.exists());
}

#[test]
fn test_unsupported_output_extension_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "a.md", "text\n");
    let output = dir.path().join("a.html");

    let err = Converter::default()
        .convert(&input, &output, &SerializeOptions::default())
        .unwrap_err();
    assert!(matches!(err, FormatError::UnsupportedFormat(_)), "{err:?}");
    assert!(err.to_string().starts_with("Unsupported format"));
    assert!(!output.exists());
}

#[test]
fn test_docx_is_not_an_input() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "a.docx", "not really a docx");
    let err = Converter::default()
        .convert(&input, &dir.path().join("a.md"), &SerializeOptions::default())
        .unwrap_err();
    assert!(matches!(err, FormatError::UnsupportedFormat(_)), "{err:?}");
}

#[test]
fn test_pdf_to_markdown() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "src.md", "# Overview\n\nEverything is fine.\n");
    let pdf = dir.path().join("mid.pdf");
    let back = dir.path().join("back.md");
    let converter = Converter::default();

    converter
        .convert(&input, &pdf, &SerializeOptions::default())
        .unwrap();
    let report = converter
        .convert(&pdf, &back, &SerializeOptions::default())
        .unwrap();
    assert_eq!(report.source_format, "pdf");

    let markdown = fs::read_to_string(&back).unwrap();
    assert!(markdown.starts_with("# mid\n"), "{markdown}");
    assert!(markdown.contains("Everything is fine."), "{markdown}");
    assert!(markdown.contains("Overview"), "{markdown}");
}

#[test]
fn test_convert_to_string() {
    let converter = Converter::default();
    let input = fixture_path("kitchensink.md");

    let markdown = converter.convert_to_string(&input, "markdown").unwrap();
    assert!(markdown.starts_with("# kitchensink\n\n# Kitchen Sink\n"));

    let summary = converter.convert_to_string(&input, "pdf").unwrap();
    assert!(summary.starts_with("Title: kitchensink\nElements: 10"));

    let err = converter.convert_to_string(&input, "rtf").unwrap_err();
    assert!(matches!(err, FormatError::FormatNotFound(_)));
}
