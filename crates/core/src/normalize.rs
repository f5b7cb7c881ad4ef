//! Input text preparation.
//!
//! Splits raw text into lines, recognizes source page markers left by an
//! upstream extractor, and derives document labels from file names.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Prefix of a line that marks a page boundary in the source document.
pub const SOURCE_PAGE_PREFIX: &str = "--- Page";

/// Regex to pull the page number out of a `--- Page N ---` marker.
static SOURCE_PAGE_NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^--- Page\s+(\d+)").unwrap());

/// Label used when a path has no usable file stem.
const FALLBACK_LABEL: &str = "document";

/// Check whether a line is a source page marker.
///
/// Leading and trailing whitespace is ignored, so extractor output such as
/// `"  --- Page 3 ---"` is recognized.
pub fn is_source_page_marker(line: &str) -> bool {
    line.trim().starts_with(SOURCE_PAGE_PREFIX)
}

/// Page number announced by a source page marker, if it carries one.
pub fn source_page_number(line: &str) -> Option<u32> {
    SOURCE_PAGE_NUMBER_REGEX
        .captures(line.trim())
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Printed columns of `text`.
///
/// Measured on the NFC composition so a base letter followed by combining
/// marks counts once. The text itself is never rewritten.
pub fn columns(text: &str) -> usize {
    text.nfc().count()
}

/// Split text into lines on `\n`, dropping one trailing `\r` from each.
///
/// Unlike [`str::lines`], a trailing newline yields a final empty line, and
/// an empty string yields a single empty line.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Replace tabs with spaces up to the next multiple of `tab_width`.
///
/// A `tab_width` of 0 removes tabs.
pub fn expand_tabs(line: &str, tab_width: usize) -> String {
    if !line.contains('\t') {
        return line.to_string();
    }

    let mut out = String::with_capacity(line.len());
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            if tab_width > 0 {
                let pad = tab_width - column % tab_width;
                out.extend(std::iter::repeat(' ').take(pad));
                column += pad;
            }
        } else {
            out.push(c);
            if !is_combining_mark(c) {
                column += 1;
            }
        }
    }
    out
}

/// Derive a header label from a file path: the file name without extension.
pub fn label_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_LABEL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_source_page_marker_detection() {
        assert!(is_source_page_marker("--- Page 2 ---"));
        assert!(is_source_page_marker("   --- Page 12 ---  "));
        assert!(is_source_page_marker("--- Page"));
        assert!(!is_source_page_marker("-- Page 2 --"));
        assert!(!is_source_page_marker("See --- Page 2 ---"));
        assert!(!is_source_page_marker(""));
    }

    #[test]
    fn test_source_page_number() {
        assert_eq!(source_page_number("--- Page 2 ---"), Some(2));
        assert_eq!(source_page_number("  --- Page 140 ---"), Some(140));
        assert_eq!(source_page_number("--- Page ---"), None);
        assert_eq!(source_page_number("--- Pages 3 ---"), None);
    }

    #[test]
    fn test_split_lines_keeps_trailing_empty() {
        let lines: Vec<&str> = split_lines("a\r\nb\n").collect();
        assert_eq!(lines, vec!["a", "b", ""]);

        let lines: Vec<&str> = split_lines("").collect();
        assert_eq!(lines, vec![""]);
    }

    #[test]
    fn test_expand_tabs() {
        assert_eq!(expand_tabs("a\tb", 4), "a   b");
        assert_eq!(expand_tabs("\tx", 8), "        x");
        assert_eq!(expand_tabs("abcd\te", 4), "abcd    e");
        assert_eq!(expand_tabs("a\tb", 0), "ab");
        assert_eq!(expand_tabs("no tabs", 4), "no tabs");
        assert_eq!(expand_tabs("e\u{301}\tx", 4), "e\u{301}   x");
    }

    #[test]
    fn test_columns_count_composed_characters() {
        assert_eq!(columns("Cafe\u{0301}"), 4);
        assert_eq!(columns("Caf\u{00e9}"), 4);
        assert_eq!(columns("\u{212B}ngstrom"), 8);
        assert_eq!(columns(""), 0);
    }

    #[test]
    fn test_label_from_path() {
        assert_eq!(label_from_path(&PathBuf::from("dir/report.txt")), "report");
        assert_eq!(label_from_path(&PathBuf::from("notes")), "notes");
        assert_eq!(label_from_path(&PathBuf::from("archive.tar.gz")), "archive.tar");
        assert_eq!(label_from_path(&PathBuf::from("/")), "document");
    }
}
