use regex::Regex;
use std::sync::OnceLock;

/// Marker the QQ Music path requires before calling lyrics synchronized.
pub const SYNC_MARKER: &str = "[00:";

static TIMESTAMP_REGEX: OnceLock<Regex> = OnceLock::new();
static WORD_TIMESTAMP_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_timestamp_regex() -> &'static Regex {
    TIMESTAMP_REGEX.get_or_init(|| Regex::new(r"(?m)^\s*\[\d{1,3}:\d{2}(?:[.:]\d{1,3})?\]").unwrap())
}

fn get_word_timestamp_regex() -> &'static Regex {
    WORD_TIMESTAMP_REGEX.get_or_init(|| Regex::new(r"<\d{1,3}:\d{2}(?:[.:]\d{1,3})?>").unwrap())
}

/// Literal marker check used on decoded QQ Music payloads.
pub fn has_sync_marker(text: &str) -> bool {
    text.contains(SYNC_MARKER)
}

/// True when at least one line starts with an `[mm:ss.xx]` timestamp.
pub fn is_synced(text: &str) -> bool {
    get_timestamp_regex().is_match(text)
}

/// True when the text carries per-word `<mm:ss.xx>` timings.
pub fn is_enhanced(text: &str) -> bool {
    is_synced(text) && get_word_timestamp_regex().is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_marker() {
        assert!(has_sync_marker("[ti:Yesterday]\n[00:01.20]Yesterday"));
        assert!(!has_sync_marker("Yesterday, all my troubles seemed so far away"));
        // A track that starts past the first minute has no [00: line.
        assert!(!has_sync_marker("[01:02.00]late start"));
    }

    #[test]
    fn test_is_synced() {
        assert!(is_synced("[00:12.34]line"));
        assert!(is_synced("[ar:Queen]\n[01:02:50]line"));
        assert!(!is_synced("[ar:Queen]\nplain text"));
        assert!(!is_synced("plain [00:12] inside a line"));
    }

    #[test]
    fn test_is_enhanced() {
        assert!(is_enhanced("[00:01.00]<00:01.00>Is <00:01.50>this"));
        assert!(!is_enhanced("[00:01.00]Is this the real life"));
    }
}
