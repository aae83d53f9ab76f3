//! Character-aware string helpers. LINE counts characters, and most of the
//! text we handle is CJK, so byte offsets are never used for cutting.

#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Returns at most `max` leading characters of `text`.
#[must_use]
pub fn take_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Truncates to `max` characters in total, including the `...` marker.
#[must_use]
pub fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    if char_len(text) <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    format!("{}...", take_chars(text, keep))
}

#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_chars_respects_code_points() {
        assert_eq!(take_chars("人工智慧新聞", 4), "人工智慧");
        assert_eq!(take_chars("ai", 10), "ai");
        assert_eq!(take_chars("", 3), "");
    }

    #[test]
    fn truncate_with_ellipsis_counts_marker() {
        assert_eq!(truncate_with_ellipsis("abcdefghij", 8), "abcde...");
        assert_eq!(truncate_with_ellipsis("區塊鏈技術發展", 6), "區塊鏈...");
        assert_eq!(truncate_with_ellipsis("short", 8), "short");
    }

    #[test]
    fn collapse_whitespace_joins_runs() {
        assert_eq!(collapse_whitespace("  a \n\t b  c "), "a b c");
    }
}
