//! Import tests for Markdown format (Markdown → IR)
//!
//! These tests verify that Markdown documents are correctly converted to the IR
//! by checking the resulting element tree.

use crate::common::read_fixture;
use insta::assert_snapshot;
use pagefold_babel::format::Format;
use pagefold_babel::formats::markdown::MarkdownFormat;
use pagefold_babel::ir::{Document, Element, ElementKind};
use pagefold_babel::FormatError;

/// Helper to parse Markdown to the IR
fn md_to_ir(md: &str) -> Document {
    MarkdownFormat.parse(md).expect("Should parse markdown")
}

fn kinds(doc: &Document) -> Vec<ElementKind> {
    doc.iter().map(Element::kind).collect()
}

#[test]
fn test_headings_levels_and_content() {
    let doc = md_to_ir("# A\n## B\n### C");
    let headings = doc.headings();
    assert_eq!(doc.len(), 3);
    assert_eq!(
        headings
            .iter()
            .map(|h| (h.level, h.content.as_str()))
            .collect::<Vec<_>>(),
        vec![(1, "A"), (2, "B"), (3, "C")]
    );
}

#[test]
fn test_fenced_code_with_language() {
    let doc = md_to_ir("```python\nprint(1)\n```");
    assert_eq!(doc.len(), 1);
    match &doc.elements[0] {
        Element::CodeBlock(code) => {
            assert_eq!(code.language.as_deref(), Some("python"));
            assert_eq!(code.content, "print(1)");
        }
        other => panic!("Expected code block, got {other:?}"),
    }
}

#[test]
fn test_code_keeps_indentation() {
    let doc = md_to_ir("```\nif x:\n    return 1\n```\n");
    assert_eq!(doc.elements[0].content(), "if x:\n    return 1");
}

#[test]
fn test_blank_line_separates_paragraphs() {
    let doc = md_to_ir("first   line  here\n\n  second\t\tline  ");
    assert_eq!(kinds(&doc), vec![ElementKind::Paragraph, ElementKind::Paragraph]);
    assert_eq!(doc.elements[0].content(), "first line here");
    assert_eq!(doc.elements[1].content(), "second line");
}

#[test]
fn test_consecutive_lines_join_into_one_paragraph() {
    let doc = md_to_ir("one\ntwo\nthree\n");
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.elements[0].content(), "one two three");
}

#[test]
fn test_structure_flushes_pending_paragraph() {
    let doc = md_to_ir("intro text\n## Heading\nmore text\n- item\nafter list\n```\ncode\n```");
    assert_eq!(
        kinds(&doc),
        vec![
            ElementKind::Paragraph,
            ElementKind::Heading,
            ElementKind::Paragraph,
            ElementKind::List,
            ElementKind::Paragraph,
            ElementKind::CodeBlock,
        ]
    );
    assert_eq!(doc.elements[4].content(), "after list");
}

#[test]
fn test_unterminated_fence_keeps_content() {
    let doc = md_to_ir("text\n```sh\nls -la\n");
    assert_eq!(kinds(&doc), vec![ElementKind::Paragraph, ElementKind::CodeBlock]);
    assert_eq!(doc.elements[1].content(), "ls -la");
}

#[test]
fn test_unterminated_empty_fence_is_dropped() {
    let doc = md_to_ir("text\n```\n");
    assert_eq!(kinds(&doc), vec![ElementKind::Paragraph]);
}

#[test]
fn test_closed_empty_fence_is_dropped() {
    let doc = md_to_ir("```\n```\ntext");
    assert_eq!(kinds(&doc), vec![ElementKind::Paragraph]);
    assert_eq!(doc.elements[0].content(), "text");
}

#[test]
fn test_fence_with_blank_line_is_kept() {
    let doc = md_to_ir("```\n\n```");
    assert_eq!(kinds(&doc), vec![ElementKind::CodeBlock]);
    assert_eq!(doc.elements[0].content(), "");
}

#[test]
fn test_too_many_hashes_is_a_paragraph() {
    let doc = md_to_ir("####### not a heading");
    assert_eq!(kinds(&doc), vec![ElementKind::Paragraph]);
}

#[test]
fn test_nested_list_structure() {
    let doc = md_to_ir("- parent\n  - child one\n  - child two\n");
    let Element::List(list) = &doc.elements[0] else {
        panic!("Expected list");
    };
    assert!(!list.ordered);
    assert_eq!(list.items.len(), 1);
    assert_eq!(list.items[0].children.len(), 1);
    let nested = &list.items[0].children[0];
    assert_eq!(nested.items.len(), 2);
    assert_eq!(nested.items[0].content, "child one");
}

#[test]
fn test_ordered_list_detected_from_first_marker() {
    let doc = md_to_ir("3. three\n7. seven\n");
    let Element::List(list) = &doc.elements[0] else {
        panic!("Expected list");
    };
    assert!(list.ordered);
    assert_eq!(list.items.len(), 2);
}

#[test]
fn test_crlf_input() {
    let doc = md_to_ir("# Title\r\n\r\nBody line\r\n");
    assert_eq!(doc.headings()[0].content, "Title");
    assert_eq!(doc.elements[1].content(), "Body line");
}

#[test]
fn test_metadata_records_source_format() {
    let doc = md_to_ir("text");
    assert_eq!(
        doc.metadata.get("source_format").map(String::as_str),
        Some("markdown")
    );
    assert!(doc.title.is_none());
}

#[test]
fn test_invalid_utf8_is_a_parse_failure() {
    let err = MarkdownFormat.parse_bytes(&[0x66, 0x6f, 0xff, 0xfe]).unwrap_err();
    assert!(matches!(err, FormatError::ParseFailure { .. }), "{err:?}");
}

#[test]
fn test_kitchensink_structure() {
    let doc = md_to_ir(&read_fixture("kitchensink.md"));
    assert_snapshot!(doc.summary(), @r"
    Elements: 10
      heading: 4
      paragraph: 2
      list: 2
      code_block: 2
    ");

    let Element::List(bullets) = &doc.elements[3] else {
        panic!("Expected list");
    };
    assert_eq!(bullets.items.len(), 3);
    let nested = &bullets.items[1].children[0];
    assert_eq!(nested.items.len(), 2);
    assert!(nested.items[1].children[0].ordered);
    assert_eq!(
        doc.elements[1].content(),
        "This document exercises every block the Markdown reader understands, including a paragraph that spans three source lines."
    );
}
