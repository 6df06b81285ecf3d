//! Core data structures for the Intermediate Representation (IR).
//!
//! Every element is a variant of [`Element`]; the variant is the element's
//! kind and never changes after construction. Lists are the only recursive
//! structure: a [`ListItem`] owns the sub-lists nested one level below it.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// The kind tag of an [`Element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Heading,
    Paragraph,
    List,
    ListItem,
    CodeBlock,
    InlineCode,
    Bold,
    Italic,
    Link,
    Image,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Heading => "heading",
            ElementKind::Paragraph => "paragraph",
            ElementKind::List => "list",
            ElementKind::ListItem => "list_item",
            ElementKind::CodeBlock => "code_block",
            ElementKind::InlineCode => "inline_code",
            ElementKind::Bold => "bold",
            ElementKind::Italic => "italic",
            ElementKind::Link => "link",
            ElementKind::Image => "image",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value in an element's attribute bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Int(usize),
    Bool(bool),
    Text(String),
}

/// Named attributes of an element, derived from its variant payload.
pub type Attributes = BTreeMap<&'static str, AttributeValue>;

/// A universal, semantic representation of a document node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Element {
    Heading(Heading),
    Paragraph(Paragraph),
    List(List),
    ListItem(ListItem),
    CodeBlock(CodeBlock),
    InlineCode(Span),
    Bold(Span),
    Italic(Span),
    Link(Link),
    Image(Image),
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Heading(_) => ElementKind::Heading,
            Element::Paragraph(_) => ElementKind::Paragraph,
            Element::List(_) => ElementKind::List,
            Element::ListItem(_) => ElementKind::ListItem,
            Element::CodeBlock(_) => ElementKind::CodeBlock,
            Element::InlineCode(_) => ElementKind::InlineCode,
            Element::Bold(_) => ElementKind::Bold,
            Element::Italic(_) => ElementKind::Italic,
            Element::Link(_) => ElementKind::Link,
            Element::Image(_) => ElementKind::Image,
        }
    }

    /// The textual content of the element. Lists carry no text of their own.
    pub fn content(&self) -> &str {
        match self {
            Element::Heading(h) => &h.content,
            Element::Paragraph(p) => &p.content,
            Element::List(_) => "",
            Element::ListItem(item) => &item.content,
            Element::CodeBlock(code) => &code.content,
            Element::InlineCode(span) | Element::Bold(span) | Element::Italic(span) => {
                &span.content
            }
            Element::Link(link) => &link.content,
            Element::Image(image) => &image.content,
        }
    }

    /// Variant-specific attributes as a name → value map.
    pub fn attributes(&self) -> Attributes {
        let mut attrs = Attributes::new();
        match self {
            Element::Heading(h) => {
                attrs.insert("level", AttributeValue::Int(h.level));
            }
            Element::List(list) => {
                attrs.insert("ordered", AttributeValue::Bool(list.ordered));
            }
            Element::CodeBlock(code) => {
                if let Some(language) = &code.language {
                    attrs.insert("language", AttributeValue::Text(language.clone()));
                }
            }
            Element::Link(link) => {
                attrs.insert("url", AttributeValue::Text(link.url.clone()));
                if let Some(title) = &link.title {
                    attrs.insert("title", AttributeValue::Text(title.clone()));
                }
            }
            Element::Image(image) => {
                attrs.insert("url", AttributeValue::Text(image.url.clone()));
                if let Some(alt) = &image.alt_text {
                    attrs.insert("alt_text", AttributeValue::Text(alt.clone()));
                }
                if let Some(title) = &image.title {
                    attrs.insert("title", AttributeValue::Text(title.clone()));
                }
            }
            Element::Paragraph(_)
            | Element::ListItem(_)
            | Element::InlineCode(_)
            | Element::Bold(_)
            | Element::Italic(_) => {}
        }
        attrs
    }
}

/// Represents the root of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub title: Option<String>,
    pub elements: Vec<Element>,
    pub metadata: BTreeMap<String, String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        Document {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn add_heading(&mut self, text: impl Into<String>, level: usize) -> &mut Self {
        self.push(Element::Heading(Heading::new(text, level)));
        self
    }

    pub fn add_paragraph(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Element::Paragraph(Paragraph::new(text)));
        self
    }

    /// Append a flat list, one item per entry of `items`.
    pub fn add_list<I, S>(&mut self, items: I, ordered: bool) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Element::List(List::with_items(ordered, items)));
        self
    }

    pub fn add_code_block(&mut self, code: impl Into<String>, language: Option<&str>) -> &mut Self {
        self.push(Element::CodeBlock(CodeBlock::new(code, language)));
        self
    }

    /// All elements of the given kind, in document order.
    pub fn elements_of_kind(&self, kind: ElementKind) -> Vec<&Element> {
        self.elements.iter().filter(|e| e.kind() == kind).collect()
    }

    pub fn headings(&self) -> Vec<&Heading> {
        self.elements
            .iter()
            .filter_map(|e| match e {
                Element::Heading(h) => Some(h),
                _ => None,
            })
            .collect()
    }

    /// Every non-empty element content joined with newlines.
    pub fn text_content(&self) -> String {
        self.elements
            .iter()
            .map(Element::content)
            .filter(|content| !content.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// A short structural description: title, element count and a per-kind
    /// tally in the order kinds first appear.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(title) = &self.title {
            parts.push(format!("Title: {title}"));
        }
        parts.push(format!("Elements: {}", self.elements.len()));

        let mut counts: Vec<(ElementKind, usize)> = Vec::new();
        for element in &self.elements {
            let kind = element.kind();
            match counts.iter_mut().find(|(k, _)| *k == kind) {
                Some((_, count)) => *count += 1,
                None => counts.push((kind, 1)),
            }
        }
        for (kind, count) in counts {
            parts.push(format!("  {kind}: {count}"));
        }
        parts.join("\n")
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// Represents a heading with a specific level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heading {
    pub level: usize,
    pub content: String,
}

impl Heading {
    pub fn new(content: impl Into<String>, level: usize) -> Self {
        Heading {
            level,
            content: content.into(),
        }
    }
}

/// Represents a paragraph of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    pub content: String,
}

impl Paragraph {
    pub fn new(content: impl Into<String>) -> Self {
        Paragraph {
            content: content.into(),
        }
    }
}

/// Represents a list of items.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<ListItem>,
}

impl List {
    pub fn new(ordered: bool) -> Self {
        List {
            ordered,
            items: Vec::new(),
        }
    }

    pub fn with_items<I, S>(ordered: bool, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        List {
            ordered,
            items: items.into_iter().map(ListItem::new).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Represents an item in a list.
///
/// `children` are the sub-lists indented one level deeper than the item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    pub content: String,
    pub children: Vec<List>,
}

impl ListItem {
    pub fn new(content: impl Into<String>) -> Self {
        ListItem {
            content: content.into(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, list: List) -> Self {
        self.children.push(list);
        self
    }
}

/// Represents a fenced block of code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeBlock {
    pub language: Option<String>,
    pub content: String,
}

impl CodeBlock {
    pub fn new(content: impl Into<String>, language: Option<&str>) -> Self {
        CodeBlock {
            language: language.filter(|l| !l.is_empty()).map(str::to_string),
            content: content.into(),
        }
    }
}

/// Inline text payload shared by the inline-code, bold and italic variants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Span {
    pub content: String,
}

/// Represents a hyperlink.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub content: String,
    pub url: String,
    pub title: Option<String>,
}

/// Represents an image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub content: String,
    pub url: String,
    pub alt_text: Option<String>,
    pub title: Option<String>,
}
