use serde::Deserialize;

/// One entry from LRCLIB's `/search` endpoint.
#[derive(Debug, Deserialize, Clone)]
pub struct LrcLibTrack {
    #[serde(rename = "trackName", default)]
    pub track_name: String,
    #[serde(rename = "artistName", default)]
    pub artist_name: String,
    #[serde(default)]
    pub instrumental: bool,
    #[serde(rename = "syncedLyrics")]
    pub synced_lyrics: Option<String>,
    #[serde(rename = "plainLyrics")]
    pub plain_lyrics: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NetEaseSearchResponse {
    pub result: Option<NetEaseSearchResult>,
}

#[derive(Debug, Deserialize)]
pub struct NetEaseSearchResult {
    #[serde(default)]
    pub songs: Vec<NetEaseSong>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NetEaseSong {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<NetEaseArtist>,
}

impl NetEaseSong {
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct NetEaseArtist {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct NetEaseLyricResponse {
    pub lrc: Option<NetEaseLyric>,
}

#[derive(Debug, Deserialize)]
pub struct NetEaseLyric {
    #[serde(default)]
    pub lyric: String,
}
