//! Greedy word wrapping to a fixed column width.

use crate::normalize::columns;
use unicode_normalization::char::is_combining_mark;

/// Wrap `text` into segments of at most `width` columns.
///
/// Breaks happen at whitespace, which is dropped at the break; spacing
/// between words on the same segment is kept as written. Leading
/// indentation is kept on the first segment when it leaves room for text.
/// A word longer than `width` is split across segments because it cannot
/// fit otherwise.
///
/// Returns no segments for whitespace-only input. `width` must be non-zero.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    debug_assert!(width > 0, "wrap width must be positive");

    let mut segments = Vec::new();
    let trimmed = text.trim_start();
    let indent = &text[..text.len() - trimmed.len()];
    let indent_len = columns(indent);

    let mut current = String::new();
    let mut current_len = 0;
    if indent_len < width {
        current.push_str(indent);
        current_len = indent_len;
    }
    // Length of the line when it holds nothing but indentation.
    let mut base_len = current_len;

    for (gap, word) in words_with_gaps(trimmed) {
        let word_len = columns(word);
        let needs_gap = current_len > base_len;
        let extra = if needs_gap {
            columns(gap) + word_len
        } else {
            word_len
        };

        if current_len + extra <= width {
            if needs_gap {
                current.push_str(gap);
            }
            current.push_str(word);
            current_len += extra;
            continue;
        }

        if current_len > base_len {
            segments.push(std::mem::take(&mut current));
            current_len = 0;
            base_len = 0;
        } else if word_len <= width {
            // Give up the indent rather than split a word that fits alone.
            current.clear();
            current_len = 0;
            base_len = 0;
        }

        if word_len <= width - current_len {
            current.push_str(word);
            current_len += word_len;
        } else {
            for cluster in clusters(word) {
                let cluster_len = columns(cluster);
                if current_len + cluster_len > width && current_len > 0 {
                    segments.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                current.push_str(cluster);
                current_len += cluster_len;
            }
            base_len = 0;
        }
    }

    if current_len > base_len {
        segments.push(current);
    }

    segments
}

/// Split text into `(preceding whitespace, word)` pairs.
fn words_with_gaps(text: &str) -> Vec<(&str, &str)> {
    let mut pairs = Vec::new();
    let mut rest = text;
    loop {
        let word_start = rest
            .find(|c: char| !c.is_whitespace())
            .unwrap_or(rest.len());
        let (gap, tail) = rest.split_at(word_start);
        if tail.is_empty() {
            break;
        }
        let word_end = tail.find(char::is_whitespace).unwrap_or(tail.len());
        let (word, remaining) = tail.split_at(word_end);
        pairs.push((gap, word));
        rest = remaining;
    }
    pairs
}

/// Split a word into base characters with their trailing combining marks.
fn clusters(word: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    for (i, c) in word.char_indices().skip(1) {
        if !is_combining_mark(c) {
            out.push(&word[start..i]);
            start = i;
        }
    }
    if start < word.len() {
        out.push(&word[start..]);
    }
    out
}
