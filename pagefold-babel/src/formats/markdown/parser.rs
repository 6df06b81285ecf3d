//! Markdown parsing (Markdown → IR import)
//!
//! A single pass over the input lines with two states: default and inside a
//! fenced code block. Consecutive plain lines accumulate into a pending
//! paragraph which is flushed by any blank line, heading, list or fence.
//!
//! Lists are the one place that looks ahead: on the first list marker the whole
//! contiguous list (including deeper-indented sub-lists) is parsed by
//! [`parse_list`], which reports how many lines it consumed so the main loop can
//! skip past them.

use crate::ir::{CodeBlock, Document, Element, Heading, List, ListItem, Paragraph};
use tracing::debug;

const FENCE: &str = "```";
const MAX_HEADING_LEVEL: usize = 6;
const TAB_WIDTH: usize = 4;

/// Parse Markdown source into a Document.
pub fn parse_from_markdown(source: &str) -> Document {
    let lines: Vec<&str> = source.lines().collect();
    let mut parser = BlockParser::default();
    let mut i = 0;

    while i < lines.len() {
        i += parser.step(&lines, i);
    }

    let doc = parser.finish();
    debug!(elements = doc.len(), "parsed markdown");
    doc
}

/// An open fenced block.
struct OpenFence<'a> {
    language: Option<String>,
    lines: Vec<&'a str>,
}

#[derive(Default)]
struct BlockParser<'a> {
    doc: Document,
    paragraph: Vec<&'a str>,
    fence: Option<OpenFence<'a>>,
}

impl<'a> BlockParser<'a> {
    /// Process the line at `i`, returning how many lines were consumed.
    fn step(&mut self, lines: &[&'a str], i: usize) -> usize {
        let line = lines[i];
        let stripped = line.trim();

        if let Some(fence) = self.fence.as_mut() {
            if stripped.starts_with(FENCE) {
                self.close_fence();
            } else {
                fence.lines.push(line);
            }
            return 1;
        }

        if let Some(info) = stripped.strip_prefix(FENCE) {
            self.flush_paragraph();
            let info = info.trim();
            self.fence = Some(OpenFence {
                language: (!info.is_empty()).then(|| info.to_string()),
                lines: Vec::new(),
            });
            return 1;
        }

        if let Some((level, text)) = parse_heading(stripped) {
            self.flush_paragraph();
            self.doc.push(Element::Heading(Heading::new(text, level)));
            return 1;
        }

        if parse_list_marker(line).is_some() {
            self.flush_paragraph();
            let (list, consumed) = parse_list(lines, i);
            debug!(items = list.items.len(), consumed, "parsed list");
            self.doc.push(Element::List(list));
            return consumed.max(1);
        }

        if stripped.is_empty() {
            self.flush_paragraph();
        } else {
            self.paragraph.push(stripped);
        }
        1
    }

    /// Emit the open fence. A fence that collected no lines produces nothing.
    fn close_fence(&mut self) {
        if let Some(fence) = self.fence.take().filter(|f| !f.lines.is_empty()) {
            self.doc.push(Element::CodeBlock(CodeBlock::new(
                fence.lines.join("\n"),
                fence.language.as_deref(),
            )));
        }
    }

    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let text = self
            .paragraph
            .iter()
            .flat_map(|line| line.split_whitespace())
            .collect::<Vec<_>>()
            .join(" ");
        self.paragraph.clear();
        if !text.is_empty() {
            self.doc.push(Element::Paragraph(Paragraph::new(text)));
        }
    }

    fn finish(mut self) -> Document {
        self.flush_paragraph();
        // An unterminated fence keeps whatever it collected.
        self.close_fence();
        self.doc
    }
}

/// A recognised list-item line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ListMarker<'a> {
    pub indent: usize,
    pub ordered: bool,
    pub content: &'a str,
}

/// Match `<indent>(*|-|+|N.)<whitespace><content>`.
pub(crate) fn parse_list_marker(line: &str) -> Option<ListMarker<'_>> {
    let indent = indentation(line);
    let rest = line.trim_start();

    let (ordered, after) = if let Some(after) = rest.strip_prefix(['*', '-', '+']) {
        (false, after)
    } else {
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        (true, rest[digits..].strip_prefix('.')?)
    };

    if !after.starts_with(char::is_whitespace) {
        return None;
    }
    let content = after.trim();
    if content.is_empty() {
        return None;
    }

    Some(ListMarker {
        indent,
        ordered,
        content,
    })
}

/// Match an ATX heading on an already-stripped line.
fn parse_heading(stripped: &str) -> Option<(usize, &str)> {
    let level = stripped.bytes().take_while(|&b| b == b'#').count();
    if level == 0 || level > MAX_HEADING_LEVEL {
        return None;
    }
    let rest = &stripped[level..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let text = rest.trim();
    (!text.is_empty()).then_some((level, text))
}

/// Width of the leading whitespace, counting a tab as four columns.
fn indentation(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum()
}

/// Parse the contiguous list that starts at `lines[start]`.
///
/// The first line fixes the base indentation and whether the list is ordered.
/// Returns the list and the number of lines consumed. A blank line, a
/// shallower line, or a non-item line at the base indentation ends the list;
/// a deeper item directly under an item opens a nested list owned by that
/// item. Any other deeper line stops parsing where it is.
pub fn parse_list(lines: &[&str], start: usize) -> (List, usize) {
    let Some(first) = lines.get(start).and_then(|line| parse_list_marker(line)) else {
        return (List::default(), 0);
    };

    let base = first.indent;
    let mut list = List::new(first.ordered);
    let mut i = start;

    while let Some(line) = lines.get(i) {
        if line.trim().is_empty() {
            break;
        }

        let indent = indentation(line);
        if indent < base {
            break;
        }

        let marker = parse_list_marker(line);
        if indent == base {
            match marker {
                Some(marker) => {
                    list.items.push(ListItem::new(marker.content));
                    i += 1;
                }
                None => break,
            }
            continue;
        }

        match (marker, list.items.last_mut()) {
            (Some(_), Some(parent)) => {
                let (nested, consumed) = parse_list(lines, i);
                parent.children.push(nested);
                i += consumed;
            }
            _ => break,
        }
    }

    (list, i - start)
}
