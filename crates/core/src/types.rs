//! Domain types for paginated output.

use serde::{Deserialize, Serialize};

/// Glyph repeated across the full page width to draw a page break.
pub const PAGE_BREAK_GLYPH: char = '═';

/// A whole document after reflow, before headers and footers are drawn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedDocument {
    /// Display name used in page headers.
    pub label: String,

    /// Output pages in order.
    pub pages: Vec<Page>,
}

impl PaginatedDocument {
    /// Create an empty document with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            pages: Vec::new(),
        }
    }

    /// Number of output pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All content lines from all pages, flattened.
    pub fn all_lines(&self) -> Vec<&str> {
        self.pages
            .iter()
            .flat_map(|p| p.lines.iter().map(OutputLine::as_str))
            .collect()
    }
}

/// What closed a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakKind {
    /// A `--- Page` marker from the source document.
    SourceMarker,
    /// The per-page line budget was used up.
    LineBudget,
    /// The input ended.
    EndOfDocument,
}

/// A single output page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// 1-based output page number.
    pub number: usize,

    /// Page number announced by the source marker that opened this page.
    pub source_page: Option<u32>,

    /// Body lines in order, already margin-padded.
    pub lines: Vec<OutputLine>,

    /// Why the page ended.
    pub break_kind: BreakKind,
}

impl Page {
    /// Create an empty page.
    pub fn new(number: usize, source_page: Option<u32>, break_kind: BreakKind) -> Self {
        Self {
            number,
            source_page,
            lines: Vec::new(),
            break_kind,
        }
    }

    /// Lines that counted against the page's line budget.
    pub fn content_lines(&self) -> usize {
        self.lines.iter().filter(|l| l.counts_toward_budget()).count()
    }

    /// True if nothing was placed on the page.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// One line of page body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputLine {
    /// Text with the left margin already applied.
    Content(String),
    /// A blank line from the source text.
    Blank,
    /// A blank line inserted before a page break; does not use budget.
    Separator,
}

impl OutputLine {
    /// The rendered text of this line.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Content(text) => text,
            Self::Blank | Self::Separator => "",
        }
    }

    /// True for lines rendered as empty.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Content(text) => text.trim().is_empty(),
            Self::Blank | Self::Separator => true,
        }
    }

    fn counts_toward_budget(&self) -> bool {
        !matches!(self, Self::Separator)
    }
}

/// Build the full-width page break rule.
pub fn page_break_line(page_width: usize) -> String {
    std::iter::repeat(PAGE_BREAK_GLYPH).take(page_width).collect()
}
