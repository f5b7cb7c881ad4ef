//! Page layout configuration.
//!
//! A [`LayoutConfig`] describes the physical page: its width in character
//! columns, the margins reserved on either side, how many content lines fit
//! before a page break, and which annotations (header, footer, page numbers)
//! are drawn.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Layout settings shared by every page of a formatted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Total character columns per line (standard printer width).
    pub page_width: usize,

    /// Columns reserved on the left of every line.
    pub margin_left: usize,

    /// Columns reserved on the right of every line.
    pub margin_right: usize,

    /// Content lines per page before a break is forced.
    pub lines_per_page: usize,

    /// Draw a header line at the top of each page.
    pub include_header: bool,

    /// Draw a footer line at the bottom of each page.
    pub include_footer: bool,

    /// Show `Page <n>` in the header and footer.
    pub include_page_numbers: bool,

    /// Column width of a tab stop; tabs are expanded to spaces.
    pub tab_width: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: 80,
            margin_left: 4,
            margin_right: 4,
            lines_per_page: 60,
            include_header: true,
            include_footer: true,
            include_page_numbers: true,
            tab_width: 8,
        }
    }
}

impl LayoutConfig {
    /// Create a configuration with the default letter-size layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the total page width in columns.
    pub fn with_page_width(mut self, width: usize) -> Self {
        self.page_width = width;
        self
    }

    /// Set both margins.
    pub fn with_margins(mut self, left: usize, right: usize) -> Self {
        self.margin_left = left;
        self.margin_right = right;
        self
    }

    /// Set the number of content lines per page.
    pub fn with_lines_per_page(mut self, lines: usize) -> Self {
        self.lines_per_page = lines.max(1); // At least 1 line per page
        self
    }

    /// Enable or disable the header line.
    pub fn with_header(mut self, enabled: bool) -> Self {
        self.include_header = enabled;
        self
    }

    /// Enable or disable the footer line.
    pub fn with_footer(mut self, enabled: bool) -> Self {
        self.include_footer = enabled;
        self
    }

    /// Enable or disable page numbers in header and footer.
    pub fn with_page_numbers(mut self, enabled: bool) -> Self {
        self.include_page_numbers = enabled;
        self
    }

    /// Set the tab stop width used when expanding tabs.
    pub fn with_tab_width(mut self, width: usize) -> Self {
        self.tab_width = width;
        self
    }

    /// Columns left for text once both margins are taken out.
    ///
    /// Returns 0 when the margins consume the whole page.
    pub fn content_width(&self) -> usize {
        self.page_width
            .saturating_sub(self.margin_left)
            .saturating_sub(self.margin_right)
    }

    /// Check the layout and clamp values that have a safe minimum.
    ///
    /// A layout without content width is rejected; a zero line budget is
    /// raised to one line per page.
    pub fn validate(mut self) -> Result<Self> {
        if self.content_width() == 0 {
            return Err(Error::InvalidLayout {
                page_width: self.page_width,
                margin_left: self.margin_left,
                margin_right: self.margin_right,
            });
        }
        self.lines_per_page = self.lines_per_page.max(1);
        Ok(self)
    }

    /// Parse a JSON layout. Missing fields take their default values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()
    }

    /// Load a JSON layout from disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
