//! Column helpers for fixed-width receipt rows
//!
//! Widths are counted in characters, matching how `format!` pads strings,
//! so a truncated value never splits a multi-byte character.

/// Truncate a string to at most `max_chars` characters (no ellipsis)
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Pad a string to exactly `width` characters
///
/// If the string is longer than the width, it will be truncated.
pub fn pad_chars(s: &str, width: usize, align_right: bool) -> String {
    let s = truncate_chars(s, width);
    if align_right {
        format!("{:>width$}", s)
    } else {
        format!("{:<width$}", s)
    }
}
