//! Reflow phase: wrap lines and assign them to pages.
//!
//! Lines are processed top to bottom. A page closes when its line budget is
//! used up or when a source page marker is seen; overlong lines are wrapped
//! to the content width and may continue on the next page.

use crate::config::LayoutConfig;
use crate::normalize::{
    columns, expand_tabs, is_source_page_marker, source_page_number, split_lines,
};
use crate::types::{BreakKind, OutputLine, Page};
use crate::wrap::wrap;

/// Pagination state threaded through a single reflow pass.
struct ReflowState<'a> {
    config: &'a LayoutConfig,
    margin: String,
    /// Finished pages.
    pages: Vec<Page>,
    /// Lines on the page being filled.
    lines: Vec<OutputLine>,
    /// Budgeted lines on the page being filled.
    line_count: usize,
    /// 1-based number of the page being filled.
    current_page: usize,
    /// Source page number for the page being filled.
    source_page: Option<u32>,
    /// The page being filled was opened by a source page marker.
    opened_by_marker: bool,
}

impl<'a> ReflowState<'a> {
    fn new(config: &'a LayoutConfig) -> Self {
        Self {
            config,
            margin: " ".repeat(config.margin_left),
            pages: Vec::new(),
            lines: Vec::new(),
            line_count: 0,
            current_page: 1,
            source_page: None,
            opened_by_marker: false,
        }
    }

    /// Nothing has been emitted and no marker has been seen yet.
    fn at_document_start(&self) -> bool {
        self.pages.is_empty() && self.lines.is_empty() && !self.opened_by_marker
    }

    fn close_page(&mut self, break_kind: BreakKind) {
        log::debug!(
            "Closing page {} ({} lines, {:?})",
            self.current_page,
            self.line_count,
            break_kind
        );
        let mut page = Page::new(self.current_page, self.source_page.take(), break_kind);
        page.lines = std::mem::take(&mut self.lines);
        self.pages.push(page);
        self.line_count = 0;
        self.current_page += 1;
        self.opened_by_marker = false;
    }

    /// Append a separator unless the page already ends blank.
    fn push_separator(&mut self) {
        if self.lines.last().is_some_and(|l| !l.is_blank()) {
            self.lines.push(OutputLine::Separator);
        }
    }

    fn break_if_full(&mut self) {
        if self.line_count >= self.config.lines_per_page {
            self.close_page(BreakKind::LineBudget);
        }
    }

    fn push_line(&mut self, line: OutputLine) {
        self.lines.push(line);
        self.line_count += 1;
    }

    fn source_marker(&mut self, line: &str) {
        let number = source_page_number(line);
        if !self.at_document_start() {
            self.push_separator();
            self.close_page(BreakKind::SourceMarker);
        }
        // A leading marker opens the first page instead of closing an empty one.
        self.source_page = number;
        self.opened_by_marker = true;
    }

    fn text_line(&mut self, line: &str) {
        if line.trim().is_empty() {
            // A blank line never opens a page.
            if self.line_count > 0 && self.line_count < self.config.lines_per_page {
                self.push_line(OutputLine::Blank);
            }
            return;
        }

        let line = expand_tabs(line, self.config.tab_width);
        let width = self.config.content_width();
        if columns(&line) > width {
            let segments = wrap(&line, width);
            log::trace!("Wrapped line into {} segments", segments.len());
            for segment in segments {
                self.break_if_full();
                let padded = format!("{}{}", self.margin, segment);
                self.push_line(OutputLine::Content(padded));
            }
            return;
        }

        self.break_if_full();
        let padded = format!("{}{}", self.margin, line);
        self.push_line(OutputLine::Content(padded));
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.lines.is_empty() || self.pages.is_empty() || self.opened_by_marker {
            self.push_separator();
            self.close_page(BreakKind::EndOfDocument);
        }
        self.pages
    }
}

/// Reflow raw text into pages according to `config`.
///
/// `config` must have a positive content width; [`LayoutConfig::validate`]
/// guarantees this.
pub fn reflow(text: &str, config: &LayoutConfig) -> Vec<Page> {
    let mut state = ReflowState::new(config);

    for line in split_lines(text) {
        if is_source_page_marker(line) {
            state.source_marker(line);
        } else {
            state.text_line(line);
        }
    }

    state.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LayoutConfig {
        LayoutConfig::default().validate().unwrap()
    }

    fn page_text(page: &Page) -> Vec<&str> {
        page.lines.iter().map(OutputLine::as_str).collect()
    }

    #[test]
    fn test_single_short_line() {
        let pages = reflow("short line", &config());
        assert_eq!(pages.len(), 1);
        assert_eq!(page_text(&pages[0]), vec!["    short line", ""]);
        assert_eq!(pages[0].break_kind, BreakKind::EndOfDocument);
        assert_eq!(pages[0].number, 1);
    }

    #[test]
    fn test_empty_input_single_blank_page() {
        let pages = reflow("", &config());
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn test_source_marker_breaks_early() {
        let text = "one\ntwo\nthree\nfour\nfive\n--- Page 2 ---\nsix";
        let pages = reflow(text, &config());
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].content_lines(), 5);
        assert_eq!(pages[0].break_kind, BreakKind::SourceMarker);
        assert_eq!(pages[0].lines.last(), Some(&OutputLine::Separator));
        assert_eq!(pages[1].source_page, Some(2));
        assert_eq!(page_text(&pages[1]), vec!["    six", ""]);
    }

    #[test]
    fn test_leading_source_marker_does_not_add_page() {
        let text = "\n--- Page 1 ---\n\nfirst\n\n--- Page 2 ---\n\nsecond\n";
        let pages = reflow(text, &config());
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].source_page, Some(1));
        assert_eq!(pages[1].source_page, Some(2));
        assert_eq!(page_text(&pages[0]), vec!["    first", ""]);
        assert_eq!(page_text(&pages[1]), vec!["    second", ""]);
    }

    #[test]
    fn test_consecutive_markers_keep_empty_page() {
        let text = "a\n--- Page 2 ---\n--- Page 3 ---\nb";
        let pages = reflow(text, &config());
        assert_eq!(pages.len(), 3);
        assert!(pages[1].is_empty());
        assert_eq!(pages[1].source_page, Some(2));
        assert_eq!(pages[2].source_page, Some(3));
    }

    #[test]
    fn test_leading_consecutive_markers_keep_empty_page() {
        let pages = reflow("--- Page 1 ---\n--- Page 2 ---\nx", &config());
        assert_eq!(pages.len(), 2);
        assert_eq!(
            pages.iter().map(|p| p.source_page).collect::<Vec<_>>(),
            vec![Some(1), Some(2)]
        );
        assert!(pages[0].is_empty());
        assert_eq!(page_text(&pages[1]), vec!["    x", ""]);
    }

    #[test]
    fn test_trailing_marker_keeps_final_page() {
        let pages = reflow("a\n--- Page 2 ---\n", &config());
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].break_kind, BreakKind::SourceMarker);
        assert_eq!(pages[1].source_page, Some(2));
        assert!(pages[1].is_empty());
    }

    #[test]
    fn test_lone_marker_single_page() {
        let pages = reflow("--- Page 1 ---\n", &config());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].source_page, Some(1));
    }

    #[test]
    fn test_tabs_expanded_in_short_lines() {
        let config = config();
        let line = format!("{}\t{}", "a".repeat(10), "b".repeat(60));
        let pages = reflow(&line, &config);
        let lines = page_text(&pages[0]);
        assert!(!lines.iter().any(|l| l.contains('\t')));
        for line in &lines {
            assert!(columns(line) <= config.margin_left + config.content_width());
        }
        assert_eq!(lines[0], format!("    {}", "a".repeat(10)));
        assert_eq!(lines[1], format!("    {}", "b".repeat(60)));

        let pages = reflow("a\tb", &config);
        assert_eq!(page_text(&pages[0])[0], "    a       b");
    }

    #[test]
    fn test_decomposed_text_fits_by_columns() {
        let config = config();
        let line = "e\u{301}".repeat(config.content_width());
        let pages = reflow(&line, &config);
        assert_eq!(pages[0].content_lines(), 1);
        assert_eq!(page_text(&pages[0])[0], format!("    {}", line));
    }

    #[test]
    fn test_line_budget_breaks() {
        let config = config().with_lines_per_page(3);
        let text = "1\n2\n3\n4\n5\n6\n7";
        let pages = reflow(text, &config);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].break_kind, BreakKind::LineBudget);
        assert_eq!(page_text(&pages[0]), vec!["    1", "    2", "    3"]);
        assert_eq!(page_text(&pages[2]), vec!["    7", ""]);
        assert_eq!(
            pages.iter().map(|p| p.number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_blank_lines_dropped_at_page_start() {
        let config = config().with_lines_per_page(3);
        let text = "\n\na\nb\nc\n\n\nd\n\ne";
        let pages = reflow(text, &config);
        assert_eq!(pages.len(), 2);
        assert_eq!(page_text(&pages[0]), vec!["    a", "    b", "    c"]);
        assert_eq!(page_text(&pages[1]), vec!["    d", "", "    e", ""]);
    }

    #[test]
    fn test_blank_lines_are_unpadded() {
        let pages = reflow("a\n   \nb", &config());
        assert_eq!(page_text(&pages[0]), vec!["    a", "", "    b", ""]);
        assert_eq!(pages[0].lines[1], OutputLine::Blank);
    }

    #[test]
    fn test_long_line_wrapped_with_margin() {
        let config = config();
        let long = "lorem ipsum ".repeat(17);
        let long = long.trim_end();
        let pages = reflow(long, &config);
        let lines = page_text(&pages[0]);
        assert_eq!(lines.len(), 4);
        for line in &lines[..3] {
            assert!(line.starts_with("    "));
            assert!(line.chars().count() - 4 <= config.content_width());
        }
    }

    #[test]
    fn test_wrap_straddles_page_break() {
        let config = LayoutConfig::default()
            .with_page_width(18)
            .with_margins(4, 4)
            .with_lines_per_page(3)
            .validate()
            .unwrap();
        let text = "head\nalpha beta gamma delta epsilon";
        let pages = reflow(text, &config);
        assert_eq!(pages.len(), 2);
        assert_eq!(
            page_text(&pages[0]),
            vec!["    head", "    alpha beta", "    gamma"]
        );
        assert_eq!(page_text(&pages[1]), vec!["    delta", "    epsilon", ""]);
    }

    #[test]
    fn test_line_exactly_content_width_not_wrapped() {
        let config = config();
        let line = "x".repeat(config.content_width());
        let pages = reflow(&line, &config);
        assert_eq!(pages[0].content_lines(), 1);
    }

    #[test]
    fn test_crlf_input() {
        let pages = reflow("a\r\nb\r\n", &config());
        assert_eq!(page_text(&pages[0]), vec!["    a", "    b", ""]);
    }
}
