//! Text utilities for console rendering.
//!
//! Server text is untrusted terminal content: it may carry escape sequences
//! and control characters that would corrupt the ratatui buffer.

use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates a string with ellipsis if it exceeds `max_width` terminal columns.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut truncated = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width + 1 > max_width {
            break;
        }
        width += ch_width;
        truncated.push(ch);
    }
    truncated.push('…');
    truncated
}

/// Removes escape bytes and other control characters, and expands tabs to
/// four spaces. Newlines are kept; callers split on them.
///
/// Borrows when there is nothing to change.
pub fn sanitize_for_display(s: &str) -> Cow<'_, str> {
    let needs_change = s.chars().any(|c| c == '\t' || (c.is_control() && c != '\n'));
    if !needs_change {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\t' => out.push_str("    "),
            '\n' => out.push('\n'),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Splits `text` into rows no wider than `width` columns.
///
/// Breaks on explicit newlines first, then at the last space that fits, or
/// mid-word when a single word is wider than the row. Always returns at
/// least one (possibly empty) row.
pub fn wrap_to_width(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();

    for line in text.split('\n') {
        let mut row = String::new();
        let mut row_width = 0;
        // Byte offset in `row` just after the last space, and the width before it.
        let mut last_space: Option<(usize, usize)> = None;

        for ch in line.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if row_width + ch_width > width && !row.is_empty() {
                if ch == ' ' {
                    rows.push(row.trim_end().to_string());
                    row.clear();
                    row_width = 0;
                    last_space = None;
                    continue;
                }
                match last_space {
                    Some((split, split_width)) if split < row.len() => {
                        let rest = row.split_off(split);
                        rows.push(row.trim_end().to_string());
                        row = rest;
                        row_width -= split_width;
                    }
                    _ => {
                        rows.push(std::mem::take(&mut row));
                        row_width = 0;
                    }
                }
                last_space = None;
            }

            row.push(ch);
            row_width += ch_width;
            if ch == ' ' {
                last_space = Some((row.len(), row_width));
            }
        }
        rows.push(row);
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("/home/user", 20), "/home/user");
        assert_eq!(truncate_with_ellipsis("/home/user", 10), "/home/user");
        assert_eq!(truncate_with_ellipsis("/home/user/docs", 8), "/home/u…");
        assert_eq!(truncate_with_ellipsis("abc", 1), "…");
    }

    #[test]
    fn test_truncate_with_ellipsis_wide_cjk() {
        // Each CJK character takes two columns.
        assert_eq!(truncate_with_ellipsis("中文test", 6), "中文t…");
    }

    #[test]
    fn test_sanitize_strips_escapes_and_expands_tabs() {
        let result = sanitize_for_display("\x1b[31mred\x1b[0m\ttext\x07");
        assert_eq!(result, "[31mred[0m    text");
    }

    #[test]
    fn test_sanitize_borrows_clean_text() {
        let result = sanitize_for_display("clean\ntext");
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_wrap_prefers_spaces() {
        assert_eq!(
            wrap_to_width("access granted to mainframe", 10),
            vec!["access", "granted to", "mainframe"]
        );
    }

    #[test]
    fn test_wrap_splits_long_words_and_newlines() {
        assert_eq!(wrap_to_width("abcdefgh\nxy", 3), vec!["abc", "def", "gh", "xy"]);
        assert_eq!(wrap_to_width("", 5), vec![""]);
    }
}
