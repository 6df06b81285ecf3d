//! DOCX rendering (IR → WordprocessingML package)
//!
//! The package is written part by part as XML strings and zipped. Only the
//! parts Word needs to open the file are produced: content types, package and
//! document relationships, the main document, styles, settings, footers and
//! core properties.
//!
//! Lists are not backed by a numbering part; each item is an indented
//! paragraph carrying its own bullet or number, one indentation step per
//! nesting level.

use crate::error::FormatError;
use crate::footer::{FooterConfig, FooterLayout};
use crate::format::SerializeOptions;
use crate::ir::{CodeBlock, Document, Element, List};
use chrono::NaiveDateTime;
use quick_xml::escape::escape;
use std::fmt::Write as _;
use std::io::{Cursor, Write};
use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// One inch in twentieths of a point.
const INCH: u32 = 1440;
const MARGIN: u32 = INCH;
const LIST_BASE_INDENT: u32 = INCH / 4;
const LIST_LEVEL_INDENT: u32 = INCH / 2;
const MAX_HEADING_LEVEL: usize = 9;

/// Stands in for `{page}` while footer text is rendered, then becomes a
/// `PAGE` field. Taken from the private-use area so it cannot clash with text.
const PAGE_MARKER: &str = "\u{E000}";

const ODD_FOOTER_PART: &str = "word/footer1.xml";
const EVEN_FOOTER_PART: &str = "word/footer2.xml";

/// A named part of the package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub name: &'static str,
    pub xml: String,
}

/// Render `doc` to a zipped DOCX package, dating footers with `now`.
pub fn render_docx(
    doc: &Document,
    options: &SerializeOptions,
    now: NaiveDateTime,
) -> Result<Vec<u8>, FormatError> {
    let parts = build_parts(doc, options, now)?;
    write_package(&parts)
}

/// Build every part of the package without zipping it.
pub fn build_parts(
    doc: &Document,
    options: &SerializeOptions,
    now: NaiveDateTime,
) -> Result<Vec<Part>, FormatError> {
    let footers = Footers::render(&options.footer, now)?;
    let double_sided = footers.even.is_some();

    let mut parts = vec![
        Part {
            name: "[Content_Types].xml",
            xml: content_types(&footers),
        },
        Part {
            name: "_rels/.rels",
            xml: package_relationships(),
        },
        Part {
            name: "word/_rels/document.xml.rels",
            xml: document_relationships(&footers),
        },
        Part {
            name: "word/document.xml",
            xml: document_xml(doc, options, &footers),
        },
        Part {
            name: "word/styles.xml",
            xml: styles_xml(),
        },
        Part {
            name: "word/settings.xml",
            xml: settings_xml(double_sided),
        },
        Part {
            name: "docProps/core.xml",
            xml: core_properties(doc),
        },
    ];

    if let Some(odd) = &footers.odd {
        parts.push(Part {
            name: ODD_FOOTER_PART,
            xml: odd.clone(),
        });
    }
    if let Some(even) = &footers.even {
        parts.push(Part {
            name: EVEN_FOOTER_PART,
            xml: even.clone(),
        });
    }

    debug!(parts = parts.len(), double_sided, "built docx package");
    Ok(parts)
}

fn write_package(parts: &[Part]) -> Result<Vec<u8>, FormatError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for part in parts {
        zip.start_file(part.name, deflated).map_err(package_error)?;
        zip.write_all(part.xml.as_bytes()).map_err(package_error)?;
    }

    let cursor = zip.finish().map_err(package_error)?;
    Ok(cursor.into_inner())
}

fn package_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> FormatError {
    FormatError::render_failure("Error writing DOCX package", e)
}

/// Footer parts for odd (default) and, when double-sided, even pages.
struct Footers {
    odd: Option<String>,
    even: Option<String>,
}

impl Footers {
    fn render(config: &FooterConfig, now: NaiveDateTime) -> Result<Self, FormatError> {
        if !config.is_enabled() {
            return Ok(Footers {
                odd: None,
                even: None,
            });
        }

        let (left, right) = config.footer_for_page_with_label(1, PAGE_MARKER, now)?;
        let odd = Some(footer_xml(&left, &right));

        let even = if config.layout() == FooterLayout::Double {
            let (left, right) = config.footer_for_page_with_label(2, PAGE_MARKER, now)?;
            Some(footer_xml(&left, &right))
        } else {
            None
        };

        Ok(Footers { odd, even })
    }
}

fn footer_xml(left: &str, right: &str) -> String {
    let mut xml = format!(r#"{XML_DECL}<w:ftr xmlns:w="{W_NS}" xmlns:r="{R_NS}"><w:p><w:pPr><w:pStyle w:val="Footer"/></w:pPr>"#);
    push_footer_text(&mut xml, left);
    xml.push_str("<w:r><w:tab/></w:r>");
    push_footer_text(&mut xml, right);
    xml.push_str("</w:p></w:ftr>");
    xml
}

/// Emit text runs, turning every page marker into a live page-number field.
fn push_footer_text(xml: &mut String, text: &str) {
    for (i, segment) in text.split(PAGE_MARKER).enumerate() {
        if i > 0 {
            xml.push_str(r#"<w:fldSimple w:instr=" PAGE "><w:r><w:t>1</w:t></w:r></w:fldSimple>"#);
        }
        if !segment.is_empty() {
            push_run(xml, segment);
        }
    }
}

fn push_run(xml: &mut String, text: &str) {
    let _ = write!(
        xml,
        r#"<w:r><w:t xml:space="preserve">{}</w:t></w:r>"#,
        escape(text)
    );
}

fn push_paragraph(xml: &mut String, properties: &str, text: &str) {
    xml.push_str("<w:p>");
    if !properties.is_empty() {
        let _ = write!(xml, "<w:pPr>{properties}</w:pPr>");
    }
    push_run(xml, text);
    xml.push_str("</w:p>");
}

fn styled(style: &str) -> String {
    format!(r#"<w:pStyle w:val="{style}"/>"#)
}

fn document_xml(doc: &Document, options: &SerializeOptions, footers: &Footers) -> String {
    let mut body = String::new();

    if let Some(title) = &doc.title {
        push_paragraph(&mut body, &styled("Title"), title);
    }

    for element in doc {
        match element {
            Element::Heading(h) => {
                let level = h.level.clamp(1, MAX_HEADING_LEVEL);
                push_paragraph(&mut body, &styled(&format!("Heading{level}")), &h.content);
            }
            Element::Paragraph(p) => push_paragraph(&mut body, "", &p.content),
            Element::List(list) => push_list(&mut body, list, 0),
            Element::CodeBlock(code) => push_code_block(&mut body, code),
            other => {
                if !other.content().is_empty() {
                    push_paragraph(&mut body, "", other.content());
                }
            }
        }
    }

    let (width, height) = options.page_size.twips();
    let mut section = String::from("<w:sectPr>");
    if footers.odd.is_some() {
        section.push_str(r#"<w:footerReference w:type="default" r:id="rIdFooterOdd"/>"#);
    }
    if footers.even.is_some() {
        section.push_str(r#"<w:footerReference w:type="even" r:id="rIdFooterEven"/>"#);
    }
    let _ = write!(
        section,
        r#"<w:pgSz w:w="{width}" w:h="{height}"/><w:pgMar w:top="{MARGIN}" w:right="{MARGIN}" w:bottom="{MARGIN}" w:left="{MARGIN}" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr>"#
    );

    format!(
        r#"{XML_DECL}<w:document xmlns:w="{W_NS}" xmlns:r="{R_NS}"><w:body>{body}{section}</w:body></w:document>"#
    )
}

fn push_list(xml: &mut String, list: &List, depth: u32) {
    let left = LIST_BASE_INDENT + LIST_LEVEL_INDENT * depth;
    let properties = format!(r#"<w:ind w:left="{left}" w:hanging="{LIST_BASE_INDENT}"/>"#);

    for (index, item) in list.items.iter().enumerate() {
        let bullet = if list.ordered {
            format!("{}.", index + 1)
        } else {
            "\u{2022}".to_string()
        };
        push_paragraph(xml, &properties, &format!("{bullet} {}", item.content));
        for child in &item.children {
            push_list(xml, child, depth + 1);
        }
    }
}

/// One paragraph per block; source lines are kept with explicit breaks.
fn push_code_block(xml: &mut String, code: &CodeBlock) {
    xml.push_str("<w:p><w:pPr>");
    xml.push_str(&styled("Code"));
    xml.push_str("</w:pPr>");
    for (i, line) in code.content.split('\n').enumerate() {
        if i > 0 {
            xml.push_str("<w:r><w:br/></w:r>");
        }
        push_run(xml, line);
    }
    xml.push_str("</w:p>");
}

fn content_types(footers: &Footers) -> String {
    let mut xml = format!(
        r#"{XML_DECL}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/word/settings.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#
    );
    for (present, part) in [
        (footers.odd.is_some(), ODD_FOOTER_PART),
        (footers.even.is_some(), EVEN_FOOTER_PART),
    ] {
        if present {
            let _ = write!(
                xml,
                r#"<Override PartName="/{part}" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml"/>"#
            );
        }
    }
    xml.push_str("</Types>");
    xml
}

fn package_relationships() -> String {
    format!(
        r#"{XML_DECL}<Relationships xmlns="{REL_NS}"><Relationship Id="rId1" Type="{R_NS}/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#
    )
}

fn document_relationships(footers: &Footers) -> String {
    let mut xml = format!(
        r#"{XML_DECL}<Relationships xmlns="{REL_NS}"><Relationship Id="rIdStyles" Type="{R_NS}/styles" Target="styles.xml"/><Relationship Id="rIdSettings" Type="{R_NS}/settings" Target="settings.xml"/>"#
    );
    if footers.odd.is_some() {
        let _ = write!(
            xml,
            r#"<Relationship Id="rIdFooterOdd" Type="{R_NS}/footer" Target="footer1.xml"/>"#
        );
    }
    if footers.even.is_some() {
        let _ = write!(
            xml,
            r#"<Relationship Id="rIdFooterEven" Type="{R_NS}/footer" Target="footer2.xml"/>"#
        );
    }
    xml.push_str("</Relationships>");
    xml
}

fn settings_xml(double_sided: bool) -> String {
    let even_and_odd = if double_sided {
        "<w:evenAndOddHeaders/>"
    } else {
        ""
    };
    format!(r#"{XML_DECL}<w:settings xmlns:w="{W_NS}">{even_and_odd}</w:settings>"#)
}

fn styles_xml() -> String {
    let mut xml = format!(
        r#"{XML_DECL}<w:styles xmlns:w="{W_NS}"><w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/><w:sz w:val="22"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="160" w:line="259" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults>"#
    );
    xml.push_str(r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#);
    xml.push_str(r#"<w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:spacing w:after="240"/></w:pPr><w:rPr><w:b/><w:sz w:val="56"/></w:rPr></w:style>"#);

    for level in 1..=MAX_HEADING_LEVEL {
        let size = match level {
            1 => 32,
            2 => 28,
            3 => 26,
            4 => 24,
            _ => 22,
        };
        let _ = write!(
            xml,
            r#"<w:style w:type="paragraph" w:styleId="Heading{level}"><w:name w:val="heading {level}"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="80"/><w:outlineLvl w:val="{outline}"/></w:pPr><w:rPr><w:b/><w:sz w:val="{size}"/></w:rPr></w:style>"#,
            outline = level - 1,
        );
    }

    xml.push_str(r#"<w:style w:type="paragraph" w:customStyle="1" w:styleId="Code"><w:name w:val="Code"/><w:basedOn w:val="Normal"/><w:pPr><w:spacing w:before="144" w:after="144" w:line="240" w:lineRule="auto"/><w:ind w:left="720"/></w:pPr><w:rPr><w:rFonts w:ascii="Courier New" w:hAnsi="Courier New" w:cs="Courier New"/><w:sz w:val="20"/></w:rPr></w:style>"#);
    xml.push_str(r#"<w:style w:type="paragraph" w:styleId="Footer"><w:name w:val="footer"/><w:basedOn w:val="Normal"/><w:pPr><w:spacing w:after="0"/></w:pPr><w:rPr><w:sz w:val="18"/></w:rPr></w:style>"#);
    xml.push_str("</w:styles>");
    xml
}

fn core_properties(doc: &Document) -> String {
    let title = doc
        .title
        .as_deref()
        .map(|t| format!("<dc:title>{}</dc:title>", escape(t)))
        .unwrap_or_default();
    format!(
        r#"{XML_DECL}<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/">{title}<dc:creator>pagefold</dc:creator></cp:coreProperties>"#
    )
}
