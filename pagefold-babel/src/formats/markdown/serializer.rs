//! Markdown serialization (IR → Markdown export)
//!
//! Every block becomes one "part"; parts are separated by a blank line. Lists are
//! the exception to that spacing: a list and all of its nested sub-lists form a
//! single part, one line per item, so there is no blank line between a parent
//! item and its children.

use crate::ir::{CodeBlock, Document, Element, Heading, List};

const FENCE: &str = "```";
const INDENT: &str = "  ";
const MAX_HEADING_LEVEL: usize = 6;

/// Render a Document as Markdown text.
///
/// An empty document renders to the empty string; anything else ends with a
/// single newline.
pub fn serialize_to_markdown(doc: &Document) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(doc.len() + 1);

    if let Some(title) = &doc.title {
        parts.push(heading_line(1, title));
    }
    parts.extend(doc.iter().map(render_element));
    parts.retain(|part| !part.is_empty());

    if parts.is_empty() {
        return String::new();
    }
    let mut out = parts.join("\n\n");
    out.push('\n');
    out
}

fn render_element(element: &Element) -> String {
    match element {
        Element::Heading(Heading { level, content }) => heading_line(*level, content),
        Element::Paragraph(p) => p.content.clone(),
        Element::List(list) => {
            let mut lines = Vec::new();
            render_list(list, 0, &mut lines);
            lines.join("\n")
        }
        Element::CodeBlock(code) => render_code_block(code),
        other => other.content().to_string(),
    }
}

fn heading_line(level: usize, content: &str) -> String {
    let level = level.clamp(1, MAX_HEADING_LEVEL);
    format!("{} {}", "#".repeat(level), content)
}

/// Append one line per item, recursing into nested lists at `depth + 1`.
/// Ordered numbering restarts at 1 in every container.
fn render_list(list: &List, depth: usize, lines: &mut Vec<String>) {
    let indent = INDENT.repeat(depth);
    for (index, item) in list.items.iter().enumerate() {
        let marker = if list.ordered {
            format!("{}.", index + 1)
        } else {
            "-".to_string()
        };
        lines.push(format!("{indent}{marker} {}", item.content));
        for child in &item.children {
            render_list(child, depth + 1, lines);
        }
    }
}

fn render_code_block(code: &CodeBlock) -> String {
    let language = code.language.as_deref().unwrap_or("");
    format!("{FENCE}{language}\n{}\n{FENCE}", code.content)
}
