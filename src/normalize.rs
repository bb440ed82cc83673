use regex::Regex;
use std::sync::OnceLock;

/// Lazy-initialized regex patterns for metadata cleaning
static FEAT_REGEX: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();
static PUNCTUATION_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_feat_regex() -> &'static Regex {
    FEAT_REGEX.get_or_init(|| {
        Regex::new(r"(?i)\s*[\(\[]?\s*\b(feat\.?|ft\.?|featuring)\s+[^\)\]]*[\)\]]?").unwrap()
    })
}

fn get_whitespace_regex() -> &'static Regex {
    WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").unwrap())
}

fn get_punctuation_regex() -> &'static Regex {
    PUNCTUATION_REGEX.get_or_init(|| Regex::new(r"[_\-&\.,'!?\(\)\[\]]").unwrap())
}

/// Lowercase, strip punctuation and collapse whitespace.
pub fn clean_string(input: &str) -> String {
    let result = get_punctuation_regex().replace_all(input, " ");
    let result = get_whitespace_regex().replace_all(&result, " ");
    result.trim().to_lowercase()
}

/// Clean a title and drop featured-artist credits.
pub fn clean_title(title: &str) -> String {
    let result = get_feat_regex().replace_all(title, "");
    clean_string(&result)
}

/// Calculate similarity score between two strings (0.0 to 1.0)
pub fn similarity_score(a: &str, b: &str) -> f64 {
    strsim::jaro_winkler(a, b)
}

/// How well a candidate track matches a free-form query, in either
/// title/artist order.
pub fn match_score(query: &str, title: &str, artist: &str) -> f64 {
    let query = clean_string(query);
    let title = clean_title(title);
    let artist = clean_string(artist);

    let forward = similarity_score(&query, format!("{} {}", title, artist).trim());
    let reverse = similarity_score(&query, format!("{} {}", artist, title).trim());
    forward.max(reverse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_string() {
        assert_eq!(clean_string("Artist_Name-Here"), "artist name here");
        assert_eq!(clean_string("  Extra   Spaces  "), "extra spaces");
        assert_eq!(clean_string("Don't Stop Me Now!"), "don t stop me now");
    }

    #[test]
    fn test_clean_title() {
        assert_eq!(clean_title("P.I.M.P. (feat. Snoop Dogg)"), "p i m p");
        assert_eq!(clean_title("Song Name (Remix)"), "song name remix");
        assert_eq!(clean_title("Track ft. Artist"), "track");
    }

    #[test]
    fn test_similarity_score() {
        assert!(similarity_score("hello", "hello") > 0.99);
        assert!(similarity_score("hello", "helo") > 0.8);
        assert!(similarity_score("hello", "world") < 0.5);
    }

    #[test]
    fn test_match_score_is_order_insensitive() {
        let forward = match_score("Bohemian Rhapsody Queen", "Bohemian Rhapsody", "Queen");
        let reverse = match_score("Queen Bohemian Rhapsody", "Bohemian Rhapsody", "Queen");
        assert!(forward > 0.99);
        assert!(reverse > 0.99);
        assert!(match_score("Bohemian Rhapsody Queen", "Yesterday", "The Beatles") < forward);
    }
}
