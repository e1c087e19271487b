//! Width-aware string helpers for fixed-column layouts.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Separator width used before the pane has been sized (e.g. headless output).
pub const FALLBACK_WIDTH: usize = 40;

/// Terminal display width of `s`.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate `s` to at most `max_width` display columns, adding "..." if cut.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let budget = max_width - 3;
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

/// `width` if positive, otherwise [`FALLBACK_WIDTH`].
pub fn safe_width(width: i32) -> usize {
    if width <= 0 {
        FALLBACK_WIDTH
    } else {
        width as usize
    }
}

/// Two-letter uppercase tag for an item type, e.g. `resource -> "[RE] "`.
pub fn type_tag(item_type: &str) -> String {
    let prefix: String = item_type.chars().take(2).collect();
    format!("[{}] ", prefix.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str_short_input_unchanged() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn test_truncate_str_adds_ellipsis() {
        assert_eq!(truncate_str("a-very-long-resource-name", 10), "a-very-...");
    }

    #[test]
    fn test_truncate_str_tiny_budget() {
        assert_eq!(truncate_str("abcdef", 2), "..");
        assert_eq!(truncate_str("abcdef", 0), "");
    }

    #[test]
    fn test_truncate_str_counts_wide_chars() {
        // Each CJK character is two columns wide.
        let out = truncate_str("日本語テキスト", 9);
        assert_eq!(out, "日本語...");
        assert!(display_width(&out) <= 9);
    }

    #[test]
    fn test_safe_width() {
        assert_eq!(safe_width(0), FALLBACK_WIDTH);
        assert_eq!(safe_width(-4), FALLBACK_WIDTH);
        assert_eq!(safe_width(36), 36);
    }

    #[test]
    fn test_type_tag() {
        assert_eq!(type_tag("resource"), "[RE] ");
        assert_eq!(type_tag("c"), "[C] ");
    }
}
