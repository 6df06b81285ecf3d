//! Render → parse round trips over generated documents.

use pagefold_babel::format::Format;
use pagefold_babel::formats::markdown::MarkdownFormat;
use pagefold_babel::ir::{CodeBlock, Document, Element, Heading, List, ListItem, Paragraph};
use proptest::prelude::*;

fn words() -> impl Strategy<Value = String> {
    "[a-z]{1,8}( [a-z]{1,8}){0,3}"
}

/// Lists nested up to `depth` levels, at most one sub-list per item.
fn list(depth: u32) -> BoxedStrategy<List> {
    let leaf = (any::<bool>(), prop::collection::vec(words(), 1..5))
        .prop_map(|(ordered, items)| List::with_items(ordered, items));
    if depth == 0 {
        return leaf.boxed();
    }
    (
        any::<bool>(),
        prop::collection::vec((words(), prop::option::of(list(depth - 1))), 1..5),
    )
        .prop_map(|(ordered, items)| {
            let mut list = List::new(ordered);
            for (content, child) in items {
                let mut item = ListItem::new(content);
                item.children.extend(child);
                list.items.push(item);
            }
            list
        })
        .boxed()
}

fn element() -> impl Strategy<Value = Element> {
    prop_oneof![
        (1usize..=6, words()).prop_map(|(level, text)| Element::Heading(Heading::new(text, level))),
        words().prop_map(|text| Element::Paragraph(Paragraph::new(text))),
        list(2).prop_map(Element::List),
        (
            prop::collection::vec(words(), 1..4),
            prop::option::of("[a-z]{1,6}")
        )
            .prop_map(|(lines, language)| {
                Element::CodeBlock(CodeBlock::new(lines.join("\n"), language.as_deref()))
            }),
    ]
}

fn reparse(doc: &Document) -> Document {
    let md = MarkdownFormat.serialize(doc).unwrap();
    MarkdownFormat.parse(&md).unwrap()
}

proptest! {
    #[test]
    fn ordered_lists_keep_item_count_and_kind(items in prop::collection::vec(words(), 1..20)) {
        let mut doc = Document::new();
        doc.add_list(items.clone(), true);

        let parsed = reparse(&doc);
        prop_assert_eq!(parsed.len(), 1);
        match &parsed.elements[0] {
            Element::List(list) => {
                prop_assert!(list.ordered);
                prop_assert_eq!(list.items.len(), items.len());
            }
            other => prop_assert!(false, "expected list, got {:?}", other),
        }
    }

    #[test]
    fn nested_lists_survive(list in list(3)) {
        let mut doc = Document::new();
        doc.push(Element::List(list));

        let parsed = reparse(&doc);
        prop_assert_eq!(parsed.elements, doc.elements);
    }

    #[test]
    fn block_sequences_survive(elements in prop::collection::vec(element(), 0..8)) {
        let mut doc = Document::new();
        for element in elements {
            doc.push(element);
        }

        let parsed = reparse(&doc);
        prop_assert_eq!(parsed.elements, doc.elements);
    }
}

#[test]
fn nested_sub_list_round_trip() {
    let mut parent = List::new(false);
    parent
        .items
        .push(ListItem::new("parent").with_child(List::with_items(false, ["one", "two"])));
    let mut doc = Document::new();
    doc.push(Element::List(parent));

    let md = MarkdownFormat.serialize(&doc).unwrap();
    assert!(md.contains("\n  - one\n  - two"));

    let parsed = MarkdownFormat.parse(&md).unwrap();
    let Element::List(list) = &parsed.elements[0] else {
        panic!("Expected list");
    };
    assert_eq!(list.items.len(), 1);
    assert_eq!(list.items[0].children.len(), 1);
    assert_eq!(list.items[0].children[0].items.len(), 2);
}

#[test]
fn title_becomes_leading_heading() {
    let mut doc = Document::with_title("Doc");
    doc.add_paragraph("body");

    let parsed = reparse(&doc);
    assert!(parsed.title.is_none());
    assert_eq!(parsed.headings()[0].content, "Doc");
    assert_eq!(parsed.elements[1].content(), "body");
}
