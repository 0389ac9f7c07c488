//! Common utility functions shared across the codebase.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates text to at most `max_width` terminal columns, appending `…` when cut.
///
/// Width is measured in display columns, so wide characters count double.
///
/// # Examples
///
/// ```
/// use todoctl::utils::truncate_to_width;
///
/// assert_eq!(truncate_to_width("short", 10), "short");
/// assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
/// assert_eq!(truncate_to_width("你好世界", 5), "你好…");
/// ```
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(1);
    let mut width = 0;
    let mut result = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        result.push(c);
    }
    result.push('…');
    result
}

/// Returns `singular` when `count` is 1, `plural` otherwise.
pub fn pluralize<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}
