//! Paginator: reflow followed by annotation.

use crate::annotate::Annotator;
use crate::config::LayoutConfig;
use crate::error::Result;
use crate::reflow::reflow;
use crate::types::PaginatedDocument;
use chrono::{Local, NaiveDate};

/// Formats plain text into printable pages.
///
/// The configuration is validated once at construction; formatting itself
/// cannot fail.
#[derive(Debug, Clone)]
pub struct Paginator {
    config: LayoutConfig,
    print_date: Option<NaiveDate>,
}

impl Paginator {
    /// Create a paginator, rejecting layouts without content width.
    pub fn new(config: LayoutConfig) -> Result<Self> {
        let config = config.validate()?;
        log::debug!(
            "Paginator layout: {} columns ({} content), {} lines per page",
            config.page_width,
            config.content_width(),
            config.lines_per_page
        );
        Ok(Self {
            config,
            print_date: None,
        })
    }

    /// Stamp footers with a fixed date instead of today's.
    pub fn with_print_date(mut self, date: NaiveDate) -> Self {
        self.print_date = Some(date);
        self
    }

    /// The validated layout.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Run the reflow phase only.
    pub fn paginate(&self, text: &str, label: &str) -> PaginatedDocument {
        let mut doc = PaginatedDocument::new(label);
        doc.pages = reflow(text, &self.config);
        doc
    }

    /// Format text into pages with headers and footers.
    ///
    /// # Example output
    /// ```text
    ///     notes                                                             Page 1
    ///     short line
    ///
    ///                           Printed: 2024-03-09 | Page 1
    /// ════════════════════════════════════════════════════════════════════════════════
    /// ```
    pub fn format(&self, text: &str, label: &str) -> String {
        let doc = self.paginate(text, label);
        let date = self
            .print_date
            .unwrap_or_else(|| Local::now().date_naive());
        Annotator::new(&self.config, label, date).render(&doc)
    }

    /// Format and add a trailing newline.
    pub fn format_with_newline(&self, text: &str, label: &str) -> String {
        let mut formatted = self.format(text, label);
        formatted.push('\n');
        formatted
    }
}
