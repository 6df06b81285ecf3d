//! PDF export and import tests
//!
//! Export is checked by decoding the content streams of the rendered pages;
//! import is checked through a fake page source so the heuristics can be fed
//! exact text.

use crate::common::{fixed_now, pdf_page_texts, read_fixture, ShownText};
use lopdf::Object;
use pagefold_babel::footer::FooterConfig;
use pagefold_babel::format::Format;
use pagefold_babel::formats::markdown::MarkdownFormat;
use pagefold_babel::formats::pdf::{read_pages, render_pdf, PageSource, PdfFormat};
use pagefold_babel::ir::{Document, Element, ElementKind};
use pagefold_babel::{FormatError, PageSize, SerializeOptions};

fn render(doc: &Document, options: &SerializeOptions) -> Vec<u8> {
    render_pdf(doc, options, fixed_now()).expect("Should render pdf")
}

fn long_document(paragraphs: usize) -> Document {
    let mut doc = Document::with_title("Long");
    for i in 0..paragraphs {
        doc.add_paragraph(format!(
            "Paragraph {i} carries enough words to take up a line or two of the page body."
        ));
    }
    doc
}

fn texts(page: &[ShownText]) -> Vec<&str> {
    page.iter().map(|s| s.text.as_str()).collect()
}

#[test]
fn test_empty_document_has_one_page() {
    let pages = pdf_page_texts(&render(&Document::new(), &SerializeOptions::default()));
    assert_eq!(pages.len(), 1);
    assert_eq!(texts(&pages[0]), vec!["Last updated: 2024-03-09", "Page 1"]);
}

#[test]
fn test_long_document_breaks_pages_and_numbers_footers() {
    let pages = pdf_page_texts(&render(&long_document(150), &SerializeOptions::default()));
    assert!(pages.len() > 2, "expected several pages, got {}", pages.len());

    for (index, page) in pages.iter().enumerate() {
        let label = format!("Page {}", index + 1);
        let footer = page
            .iter()
            .find(|s| s.text == label)
            .unwrap_or_else(|| panic!("missing footer on page {}", index + 1));
        assert_eq!(footer.y, 36.0);
        assert!(footer.x > 300.0, "right footer should be right aligned");
    }

    // Body text stays inside the margins.
    for shown in pages.iter().flatten() {
        if !shown.text.starts_with("Page ") && !shown.text.starts_with("Last updated") {
            assert!(shown.y >= 72.0 && shown.y <= 720.0, "{shown:?}");
        }
    }
}

#[test]
fn test_double_layout_swaps_footer_sides() {
    let footer = FooterConfig::new(true, "double", "outer {page}", "inner {page}", "%Y").unwrap();
    let options = SerializeOptions {
        footer,
        ..SerializeOptions::default()
    };
    let pages = pdf_page_texts(&render(&long_document(80), &options));
    assert!(pages.len() >= 2);

    let left_text = |page: &[ShownText]| {
        page.iter()
            .find(|s| s.y == 36.0 && s.x == 72.0)
            .map(|s| s.text.clone())
    };
    assert_eq!(left_text(&pages[0]).as_deref(), Some("outer 1"));
    assert_eq!(left_text(&pages[1]).as_deref(), Some("inner 2"));
}

#[test]
fn test_disabled_footer_places_nothing_at_the_bottom() {
    let options = SerializeOptions {
        footer: FooterConfig::disabled(),
        ..SerializeOptions::default()
    };
    let mut doc = Document::new();
    doc.add_paragraph("only text");
    let pages = pdf_page_texts(&render(&doc, &options));
    assert_eq!(texts(&pages[0]), vec!["only text"]);
}

#[test]
fn test_a4_media_box() {
    let options = SerializeOptions {
        page_size: PageSize::A4,
        ..SerializeOptions::default()
    };
    let bytes = render(&Document::new(), &options);
    let pdf = lopdf::Document::load_mem(&bytes).unwrap();

    let catalog = pdf.catalog().unwrap();
    let pages_id = catalog.get(b"Pages").unwrap().as_reference().unwrap();
    let pages = pdf.get_dictionary(pages_id).unwrap();
    let media_box: Vec<f32> = pages
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|o| match o {
            Object::Integer(i) => *i as f32,
            Object::Real(r) => *r,
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(media_box.len(), 4);
    assert!((media_box[2] - 595.28).abs() < 0.01);
    assert!((media_box[3] - 841.89).abs() < 0.01);
}

#[test]
fn test_lists_and_code_are_laid_out() {
    let doc = MarkdownFormat.parse(&read_fixture("kitchensink.md")).unwrap();
    let pages = pdf_page_texts(&render(&doc, &SerializeOptions::default()));
    let shown: Vec<&ShownText> = pages.iter().flatten().collect();

    let bullet = shown.iter().find(|s| s.text == "\u{95}").expect("bullet glyph");
    assert_eq!(bullet.x, 72.0);
    assert!(shown.iter().any(|s| s.text == "1." && s.x > 72.0));
    assert!(shown.iter().any(|s| s.text.contains("fn main()")));
}

struct FakePages(Vec<&'static str>);

impl PageSource for FakePages {
    fn page_count(&self) -> usize {
        self.0.len()
    }

    fn page_text(&self, index: usize) -> Result<String, FormatError> {
        Ok(self.0[index].to_string())
    }
}

#[test]
fn test_heading_heuristics() {
    let pages = FakePages(vec![
        "INTRODUCTION\nThis is the opening sentence.It runs on.\n",
        "   \n",
        "2. Methods\nWe   measured   things.\nResults Overview\n",
    ]);
    let doc = read_pages(&pages).unwrap();

    let summary: Vec<(ElementKind, &str)> = doc.iter().map(|e| (e.kind(), e.content())).collect();
    assert_eq!(
        summary,
        vec![
            (ElementKind::Heading, "Introduction"),
            (ElementKind::Paragraph, "This is the opening sentence. It runs on."),
            (ElementKind::Heading, "2. Methods"),
            (ElementKind::Paragraph, "We measured things."),
            (ElementKind::Heading, "Results Overview"),
        ]
    );

    let levels: Vec<usize> = doc.headings().iter().map(|h| h.level).collect();
    assert_eq!(levels, vec![1, 2, 2]);
    assert_eq!(doc.metadata.get("page_count").map(String::as_str), Some("3"));
    assert_eq!(doc.metadata.get("source_format").map(String::as_str), Some("pdf"));
}

#[test]
fn test_page_errors_propagate() {
    struct Broken;
    impl PageSource for Broken {
        fn page_count(&self) -> usize {
            1
        }
        fn page_text(&self, _index: usize) -> Result<String, FormatError> {
            Err(FormatError::parse_failure("Error extracting text", "bad stream"))
        }
    }
    let err = read_pages(&Broken).unwrap_err();
    assert!(matches!(err, FormatError::ParseFailure { .. }));
}

#[test]
fn test_rendered_pdf_reads_back() {
    let mut doc = Document::with_title("Quarterly");
    doc.add_heading("Summary", 1)
        .add_paragraph("Revenue grew in every region.");
    let bytes = render(&doc, &SerializeOptions::default());

    let parsed = PdfFormat.parse_bytes(&bytes).unwrap();
    assert_eq!(parsed.metadata.get("page_count").map(String::as_str), Some("1"));
    let text = parsed.text_content();
    assert!(text.contains("Quarterly"), "{text}");
    assert!(text.contains("Revenue grew in every region."), "{text}");
    assert!(parsed
        .iter()
        .any(|e| matches!(e, Element::Heading(h) if h.content == "Summary")));
}

#[test]
fn test_garbage_is_a_parse_failure() {
    let err = PdfFormat.parse_bytes(b"not a pdf at all").unwrap_err();
    assert!(matches!(err, FormatError::ParseFailure { .. }), "{err:?}");
}

#[test]
fn test_text_serialize_is_summary() {
    let mut doc = Document::new();
    doc.add_paragraph("x");
    assert_eq!(PdfFormat.serialize(&doc).unwrap(), doc.summary());
}
