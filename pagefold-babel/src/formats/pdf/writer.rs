//! PDF rendering (IR → PDF export)
//!
//! Layout is a simple top-to-bottom flow: every block is broken into lines that
//! are placed at a falling baseline, and a new page starts whenever the next
//! line would cross the bottom margin. Footers are stamped afterwards, once per
//! page, so the footer policy sees the final page numbers.

use super::fonts::{encode_win_ansi, StdFont};
use crate::error::FormatError;
use crate::format::{PageSize, SerializeOptions};
use crate::footer::FooterConfig;
use crate::ir::{CodeBlock, Document, Element, List};
use chrono::NaiveDateTime;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Object, ObjectId, Stream, StringFormat};
use tracing::debug;

const INCH: f32 = 72.0;
const MARGIN: f32 = INCH;
const FOOTER_BASELINE: f32 = INCH / 2.0;
const FOOTER_SIZE: f32 = 9.0;
const ELEMENT_SPACING: f32 = 0.1 * INCH;
const TITLE_SPACING: f32 = 0.2 * INCH;
const TITLE_SIZE: f32 = 18.0;
const BODY_SIZE: f32 = 10.0;
const CODE_SIZE: f32 = 9.0;
const CODE_INDENT: f32 = 20.0;
const LIST_INDENT: f32 = 20.0;
const LINE_FACTOR: f32 = 1.2;
const HEADING_SIZES: [f32; 6] = [16.0, 14.0, 13.0, 12.0, 11.0, 10.0];

/// Render `doc` to PDF bytes, dating footers with `now`.
pub fn render_pdf(
    doc: &Document,
    options: &SerializeOptions,
    now: NaiveDateTime,
) -> Result<Vec<u8>, FormatError> {
    let mut pages = layout(doc, options.page_size);
    stamp_footers(&mut pages, &options.footer, options.page_size, now)?;
    debug!(pages = pages.len(), "laid out pdf");
    assemble(doc, pages, options.page_size)
}

/// Flow the document into per-page content operations.
fn layout(doc: &Document, page_size: PageSize) -> Vec<Vec<Operation>> {
    let mut composer = PageComposer::new(page_size);

    if let Some(title) = &doc.title {
        composer.wrapped(StdFont::Bold, TITLE_SIZE, 0.0, title);
        composer.space(TITLE_SPACING);
    }

    for element in doc {
        let placed = match element {
            Element::Heading(h) => {
                let size = HEADING_SIZES[h.level.clamp(1, HEADING_SIZES.len()) - 1];
                composer.wrapped(StdFont::Bold, size, 0.0, &h.content)
            }
            Element::Paragraph(p) => composer.wrapped(StdFont::Regular, BODY_SIZE, 0.0, &p.content),
            Element::List(list) => composer.list(list, 0),
            Element::CodeBlock(code) => composer.code(code),
            other => composer.wrapped(StdFont::Regular, BODY_SIZE, 0.0, other.content()),
        };
        if placed {
            composer.space(ELEMENT_SPACING);
        }
    }

    composer.pages
}

struct PageComposer {
    width: f32,
    height: f32,
    cursor_y: f32,
    pages: Vec<Vec<Operation>>,
}

impl PageComposer {
    fn new(page_size: PageSize) -> Self {
        let (width, height) = page_size.points();
        PageComposer {
            width,
            height,
            cursor_y: height - MARGIN,
            pages: vec![Vec::new()],
        }
    }

    fn text_width(&self) -> f32 {
        self.width - 2.0 * MARGIN
    }

    /// Move to the next baseline, breaking the page if it would not fit.
    fn next_baseline(&mut self, leading: f32) -> f32 {
        let page_has_content = self.pages.last().is_some_and(|ops| !ops.is_empty());
        if self.cursor_y - leading < MARGIN && page_has_content {
            self.pages.push(Vec::new());
            self.cursor_y = self.height - MARGIN;
        }
        self.cursor_y -= leading;
        self.cursor_y
    }

    fn space(&mut self, amount: f32) {
        self.cursor_y -= amount;
    }

    fn show(&mut self, font: StdFont, size: f32, x: f32, y: f32, text: &str) {
        if let Some(ops) = self.pages.last_mut() {
            ops.extend(text_operations(font, size, x, y, text));
        }
    }

    /// Word-wrap `text` at `indent` from the left margin. Returns whether
    /// anything was placed.
    fn wrapped(&mut self, font: StdFont, size: f32, indent: f32, text: &str) -> bool {
        let lines = wrap_words(text, font, size, self.text_width() - indent);
        for line in &lines {
            let y = self.next_baseline(size * LINE_FACTOR);
            self.show(font, size, MARGIN + indent, y, line);
        }
        !lines.is_empty()
    }

    fn list(&mut self, list: &List, depth: usize) -> bool {
        let bullet_x = MARGIN + LIST_INDENT * depth as f32;
        let text_indent = LIST_INDENT * (depth + 1) as f32;
        let leading = BODY_SIZE * LINE_FACTOR;

        for (index, item) in list.items.iter().enumerate() {
            let bullet = if list.ordered {
                format!("{}.", index + 1)
            } else {
                "\u{2022}".to_string()
            };

            let lines = wrap_words(
                &item.content,
                StdFont::Regular,
                BODY_SIZE,
                self.text_width() - text_indent,
            );
            if lines.is_empty() {
                let y = self.next_baseline(leading);
                self.show(StdFont::Regular, BODY_SIZE, bullet_x, y, &bullet);
            }
            for (i, line) in lines.iter().enumerate() {
                let y = self.next_baseline(leading);
                if i == 0 {
                    self.show(StdFont::Regular, BODY_SIZE, bullet_x, y, &bullet);
                }
                self.show(StdFont::Regular, BODY_SIZE, MARGIN + text_indent, y, line);
            }

            for child in &item.children {
                self.list(child, depth + 1);
            }
        }
        !list.is_empty()
    }

    fn code(&mut self, code: &CodeBlock) -> bool {
        let advance = StdFont::Mono.text_width(" ", CODE_SIZE);
        let max_chars = (((self.text_width() - 2.0 * CODE_INDENT) / advance) as usize).max(1);
        for source_line in code.content.split('\n') {
            for line in wrap_chars(source_line, max_chars) {
                let y = self.next_baseline(CODE_SIZE * LINE_FACTOR);
                self.show(StdFont::Mono, CODE_SIZE, MARGIN + CODE_INDENT, y, &line);
            }
        }
        true
    }
}

/// Place the footer pair at the bottom margin of every page.
fn stamp_footers(
    pages: &mut [Vec<Operation>],
    footer: &FooterConfig,
    page_size: PageSize,
    now: NaiveDateTime,
) -> Result<(), FormatError> {
    if !footer.is_enabled() {
        return Ok(());
    }
    let (width, _) = page_size.points();

    for (index, ops) in pages.iter_mut().enumerate() {
        let (left, right) = footer.footer_for_page_at(index as u32 + 1, now)?;
        if !left.is_empty() {
            ops.extend(text_operations(
                StdFont::Regular,
                FOOTER_SIZE,
                MARGIN,
                FOOTER_BASELINE,
                &left,
            ));
        }
        if !right.is_empty() {
            let x = width - MARGIN - StdFont::Regular.text_width(&right, FOOTER_SIZE);
            ops.extend(text_operations(
                StdFont::Regular,
                FOOTER_SIZE,
                x,
                FOOTER_BASELINE,
                &right,
            ));
        }
    }
    Ok(())
}

fn text_operations(font: StdFont, size: f32, x: f32, y: f32, text: &str) -> [Operation; 5] {
    [
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![
                Object::Name(font.resource_name().as_bytes().to_vec()),
                Object::Real(size),
            ],
        ),
        Operation::new("Td", vec![Object::Real(x), Object::Real(y)]),
        Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
        ),
        Operation::new("ET", vec![]),
    ]
}

/// Build the object graph and serialize it.
fn assemble(
    doc: &Document,
    pages: Vec<Vec<Operation>>,
    page_size: PageSize,
) -> Result<Vec<u8>, FormatError> {
    let mut pdf = lopdf::Document::with_version("1.5");
    let pages_id = pdf.new_object_id();

    let mut fonts = Dictionary::new();
    for font in StdFont::ALL {
        let font_id = pdf.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), font_id);
    }
    let resources_id = pdf.add_object(dictionary! { "Font" => fonts });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations }
            .encode()
            .map_err(|e| FormatError::render_failure("encoding page content", e.to_string()))?;
        let content_id = pdf.add_object(Stream::new(Dictionary::new(), content));
        let page_id: ObjectId = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let (width, height) = page_size.points();
    let count = kids.len() as i64;
    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(width),
                Object::Real(height),
            ],
        }),
    );

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", catalog_id);

    let mut info = dictionary! {
        "Producer" => Object::String(b"pagefold".to_vec(), StringFormat::Literal),
    };
    if let Some(title) = &doc.title {
        info.set(
            "Title",
            Object::String(encode_win_ansi(title), StringFormat::Literal),
        );
    }
    let info_id = pdf.add_object(info);
    pdf.trailer.set("Info", info_id);

    pdf.compress();

    let mut bytes = Vec::new();
    pdf.save_to(&mut bytes)
        .map_err(|e| FormatError::render_failure("writing PDF", e.to_string()))?;
    Ok(bytes)
}

/// Greedy word wrap against the font's advance widths. A single word wider
/// than `max_width` gets a line to itself.
fn wrap_words(text: &str, font: StdFont, size: f32, max_width: f32) -> Vec<String> {
    let space = font.text_width(" ", size);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0;

    for word in text.split_whitespace() {
        let word_width = font.text_width(word, size);
        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + space + word_width <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += space + word_width;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Hard-wrap a preformatted line every `max_chars` characters. Empty lines
/// are kept.
fn wrap_chars(line: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars
        .chunks(max_chars)
        .map(|chunk| chunk.iter().collect())
        .collect()
}
