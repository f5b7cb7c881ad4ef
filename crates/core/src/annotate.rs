//! Annotation phase: headers, footers, and page break rules.
//!
//! Each page renders as
//!
//! ```text
//! [header]
//! body lines...
//! [footer]
//! ════════════════
//! ```
//!
//! so the number of page break rules always equals the number of pages.

use crate::config::LayoutConfig;
use crate::types::{page_break_line, PaginatedDocument};
use chrono::NaiveDate;

/// Columns of the header always kept free for the page indicator.
const HEADER_INDICATOR_RESERVE: usize = 20;

/// Draws header and footer lines for one document.
#[derive(Debug, Clone)]
pub struct Annotator<'a> {
    config: &'a LayoutConfig,
    label: &'a str,
    print_date: NaiveDate,
}

impl<'a> Annotator<'a> {
    /// Create an annotator for a document label and print date.
    pub fn new(config: &'a LayoutConfig, label: &'a str, print_date: NaiveDate) -> Self {
        Self {
            config,
            label,
            print_date,
        }
    }

    /// Header line: label on the left, `Page <n>` on the right.
    ///
    /// On pages too narrow for `Page <n>` the bare number is shown.
    pub fn header(&self, page_number: usize) -> String {
        let width = self.config.content_width();
        let label: String = self
            .label
            .chars()
            .take(width.saturating_sub(HEADER_INDICATOR_RESERVE))
            .collect();
        let mut indicator = self.page_indicator(page_number);
        if indicator.chars().count() > width {
            indicator = page_number.to_string();
        }
        let label_width = width.saturating_sub(indicator.chars().count());

        let text = format!(
            "{:<label_width$}{}",
            label,
            indicator,
            label_width = label_width
        );
        format!("{}{}", self.margin(), clip(&text, width).trim_end())
    }

    /// Footer line: print date and optional page number, centered.
    pub fn footer(&self, page_number: usize) -> String {
        let mut text = format!("Printed: {}", self.print_date.format("%Y-%m-%d"));
        if self.config.include_page_numbers {
            text.push_str(&format!(" | Page {}", page_number));
        }
        let width = self.config.content_width();
        let left = center_offset(text.chars().count(), width);
        format!("{}{}{}", self.margin(), " ".repeat(left), clip(&text, width))
    }

    /// Render every page of `doc` into the final text.
    pub fn render(&self, doc: &PaginatedDocument) -> String {
        let rule = page_break_line(self.config.page_width);
        let mut out: Vec<String> = Vec::new();

        for page in &doc.pages {
            if self.config.include_header {
                out.push(self.header(page.number));
            }
            out.extend(page.lines.iter().map(|l| l.as_str().to_string()));
            if self.config.include_footer {
                out.push(self.footer(page.number));
            }
            out.push(rule.clone());
        }

        log::debug!("Rendered {} pages for {:?}", doc.pages.len(), doc.label);
        out.join("\n")
    }

    fn page_indicator(&self, page_number: usize) -> String {
        if self.config.include_page_numbers {
            format!("Page {}", page_number)
        } else {
            String::new()
        }
    }

    fn margin(&self) -> String {
        " ".repeat(self.config.margin_left)
    }
}

/// The first `width` characters of `text`.
fn clip(text: &str, width: usize) -> &str {
    match text.char_indices().nth(width) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Left padding that centers `len` columns inside `width`.
///
/// When the spare space is odd, the extra column goes left only if `width`
/// is odd as well.
fn center_offset(len: usize, width: usize) -> usize {
    let spare = width.saturating_sub(len);
    spare / 2 + (spare & width & 1)
}
