//! Footer placement policy for paginated outputs.
//!
//! A [`FooterConfig`] turns a 1-based page number into the `(left, right)` pair
//! of strings that a paginated writer places at the bottom margin. Templates
//! may reference `{date}` and `{page}`; `{{` and `}}` produce literal braces and
//! any other `{name}` is passed through untouched.
//!
//! With the double-sided layout the two strings swap on even pages, so the
//! "left" template always lands on the outer margin of a facing-pages spread.

use crate::error::FooterError;
use chrono::NaiveDateTime;
use std::fmt::Write as _;
use std::str::FromStr;

pub const DEFAULT_LEFT_TEMPLATE: &str = "Last updated: {date}";
pub const DEFAULT_RIGHT_TEMPLATE: &str = "Page {page}";
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Single- or double-sided footer layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FooterLayout {
    #[default]
    Single,
    Double,
}

impl FooterLayout {
    pub fn as_str(&self) -> &'static str {
        match self {
            FooterLayout::Single => "single",
            FooterLayout::Double => "double",
        }
    }
}

impl FromStr for FooterLayout {
    type Err = FooterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(FooterLayout::Single),
            "double" => Ok(FooterLayout::Double),
            other => Err(FooterError::InvalidLayout(other.to_string())),
        }
    }
}

/// Immutable footer configuration, validated at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterConfig {
    enabled: bool,
    layout: FooterLayout,
    left_template: String,
    right_template: String,
    date_format: String,
}

impl Default for FooterConfig {
    fn default() -> Self {
        FooterConfig {
            enabled: true,
            layout: FooterLayout::Single,
            left_template: DEFAULT_LEFT_TEMPLATE.to_string(),
            right_template: DEFAULT_RIGHT_TEMPLATE.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl FooterConfig {
    /// Build a configuration. Fails if `layout` is not `single` or `double`.
    pub fn new(
        enabled: bool,
        layout: &str,
        left_template: impl Into<String>,
        right_template: impl Into<String>,
        date_format: impl Into<String>,
    ) -> Result<Self, FooterError> {
        Ok(FooterConfig {
            enabled,
            layout: layout.parse()?,
            left_template: left_template.into(),
            right_template: right_template.into(),
            date_format: date_format.into(),
        })
    }

    /// A configuration that never produces footer text.
    pub fn disabled() -> Self {
        FooterConfig {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn layout(&self) -> FooterLayout {
        self.layout
    }

    pub fn left_template(&self) -> &str {
        &self.left_template
    }

    pub fn right_template(&self) -> &str {
        &self.right_template
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Footer text for `page_number`, dated with the local clock.
    pub fn footer_for_page(&self, page_number: u32) -> Result<(String, String), FooterError> {
        self.footer_for_page_at(page_number, chrono::Local::now().naive_local())
    }

    /// Footer text for `page_number` as of `now`.
    pub fn footer_for_page_at(
        &self,
        page_number: u32,
        now: NaiveDateTime,
    ) -> Result<(String, String), FooterError> {
        self.footer_for_page_with_label(page_number, &page_number.to_string(), now)
    }

    /// Like [`FooterConfig::footer_for_page_at`], but `{page}` is replaced by
    /// `page_label` instead of the number. Parity still follows `page_number`.
    ///
    /// Writers that cannot know the final page number (DOCX) pass a marker
    /// here and swap it for a live page field.
    pub fn footer_for_page_with_label(
        &self,
        page_number: u32,
        page_label: &str,
        now: NaiveDateTime,
    ) -> Result<(String, String), FooterError> {
        if !self.enabled {
            return Ok((String::new(), String::new()));
        }

        let date = self.format_date(now)?;
        let left = render_template(&self.left_template, &date, page_label)?;
        let right = render_template(&self.right_template, &date, page_label)?;

        if self.layout == FooterLayout::Double && page_number % 2 == 0 {
            Ok((right, left))
        } else {
            Ok((left, right))
        }
    }

    fn format_date(&self, now: NaiveDateTime) -> Result<String, FooterError> {
        let mut date = String::new();
        write!(date, "{}", now.format(&self.date_format))
            .map_err(|_| FooterError::DateFormat(self.date_format.clone()))?;
        Ok(date)
    }
}

/// Substitute `{date}` and `{page}` in `template`.
fn render_template(template: &str, date: &str, page: &str) -> Result<String, FooterError> {
    let malformed = |reason: &str| FooterError::Template {
        template: template.to_string(),
        reason: reason.to_string(),
    };

    let mut out = String::with_capacity(template.len() + date.len());
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") {
            out.push('{');
            rest = &tail[2..];
        } else if tail.starts_with("}}") {
            out.push('}');
            rest = &tail[2..];
        } else if tail.starts_with('}') {
            return Err(malformed("single '}' encountered"));
        } else {
            let Some(end) = tail.find('}') else {
                return Err(malformed("unterminated '{'"));
            };
            let name = &tail[1..end];
            if name.contains('{') {
                return Err(malformed("unexpected '{' in placeholder"));
            }
            match name {
                "date" => out.push_str(date),
                "page" => out.push_str(page),
                other => {
                    out.push('{');
                    out.push_str(other);
                    out.push('}');
                }
            }
            rest = &tail[end + 1..];
        }
    }

    out.push_str(rest);
    Ok(out)
}
