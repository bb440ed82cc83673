use crate::query::QueryOrder;

/// The four helper contracts shipped as separate binaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Synced lyrics from the generic provider chain.
    Lyrics,
    /// Synced lyrics straight from QQ Music's web endpoints.
    QqLyrics,
    /// QQ Music lyric payload for a known song mid.
    QqLyricByMid,
    /// QQ Music song candidates.
    QqSongs,
}

impl Variant {
    pub fn bin_name(self) -> &'static str {
        match self {
            Variant::Lyrics => "fetch-lyrics",
            Variant::QqLyrics => "fetch-qq-lyrics",
            Variant::QqLyricByMid => "fetch-qq-lyric-by-mid",
            Variant::QqSongs => "fetch-qq-songs",
        }
    }

    pub fn usage(self) -> String {
        match self {
            Variant::QqLyricByMid => format!("{} <mid>", self.bin_name()),
            _ => format!("{} <title> [artist]", self.bin_name()),
        }
    }

    pub fn default_query_order(self) -> QueryOrder {
        match self {
            Variant::Lyrics => QueryOrder::TitleFirst,
            _ => QueryOrder::ArtistFirst,
        }
    }

    /// The by-mid caller reads stdout as UTF-8 with a byte-order mark.
    pub fn default_bom(self) -> bool {
        matches!(self, Variant::QqLyricByMid)
    }

    /// Whether non-ASCII characters are escaped as `\uXXXX`.
    pub fn ascii_only(self) -> bool {
        !matches!(self, Variant::QqLyricByMid)
    }

    /// Whether a `searching` status line goes to stderr before the lookup.
    pub fn announces(self) -> bool {
        !matches!(self, Variant::Lyrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_orders() {
        assert_eq!(Variant::Lyrics.default_query_order(), QueryOrder::TitleFirst);
        assert_eq!(Variant::QqLyrics.default_query_order(), QueryOrder::ArtistFirst);
        assert_eq!(Variant::QqSongs.default_query_order(), QueryOrder::ArtistFirst);
    }

    #[test]
    fn test_only_by_mid_uses_bom() {
        assert!(Variant::QqLyricByMid.default_bom());
        assert!(!Variant::QqLyrics.default_bom());
        assert!(!Variant::QqLyricByMid.ascii_only());
    }

    #[test]
    fn test_usage() {
        assert_eq!(Variant::QqSongs.usage(), "fetch-qq-songs <title> [artist]");
        assert_eq!(Variant::QqLyricByMid.usage(), "fetch-qq-lyric-by-mid <mid>");
    }
}
