use std::str::FromStr;

/// Which half of the search string comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOrder {
    TitleFirst,
    ArtistFirst,
}

impl FromStr for QueryOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title-first" | "title" => Ok(QueryOrder::TitleFirst),
            "artist-first" | "artist" => Ok(QueryOrder::ArtistFirst),
            other => Err(format!("unknown query order: {}", other)),
        }
    }
}

/// Join title and artist into the upstream search string.
/// A missing or blank artist yields the title alone.
pub fn build_query(title: &str, artist: Option<&str>, order: QueryOrder) -> String {
    match artist.filter(|a| !a.trim().is_empty()) {
        Some(artist) => match order {
            QueryOrder::TitleFirst => format!("{} {}", title, artist),
            QueryOrder::ArtistFirst => format!("{} {}", artist, title),
        },
        None => title.to_string(),
    }
}
