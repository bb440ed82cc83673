//! NetEase Cloud Music web API, used as the second lyrics provider.

use super::types::{NetEaseLyricResponse, NetEaseSearchResponse, NetEaseSong};
use super::{LyricsSearch, SearchOptions};
use crate::error::FetchError;
use crate::{lrc, normalize};

const SEARCH_LIMIT: u32 = 10;
const REFERER: &str = "https://music.163.com/";

pub struct NetEaseClient {
    client: reqwest::Client,
    base_url: String,
}

impl NetEaseClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub async fn search_songs(&self, query: &str) -> Result<Vec<NetEaseSong>, FetchError> {
        let url = format!(
            "{}/search/get?s={}&type=1&limit={}",
            self.base_url,
            urlencoding::encode(query),
            SEARCH_LIMIT
        );
        tracing::debug!("Searching NetEase: {}", url);

        let body = self
            .client
            .get(&url)
            .header(reqwest::header::REFERER, REFERER)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let response: NetEaseSearchResponse = serde_json::from_str(&body)?;
        Ok(response.result.map(|r| r.songs).unwrap_or_default())
    }

    /// Raw LRC text for a song id; empty when the song has none.
    pub async fn lyric(&self, song_id: u64) -> Result<String, FetchError> {
        let url = format!("{}/song/lyric?id={}&lv=1&kv=1&tv=-1", self.base_url, song_id);
        tracing::debug!("Fetching NetEase lyric: {}", url);

        let body = self
            .client
            .get(&url)
            .header(reqwest::header::REFERER, REFERER)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let response: NetEaseLyricResponse = serde_json::from_str(&body)?;
        Ok(response.lrc.map(|l| l.lyric).unwrap_or_default())
    }
}

/// Best-matching song for the query, if any.
pub fn best_song<'a>(songs: &'a [NetEaseSong], query: &str) -> Option<&'a NetEaseSong> {
    let mut best: Option<(f64, &NetEaseSong)> = None;
    for song in songs {
        let score = normalize::match_score(query, &song.name, &song.artist_names());
        if best.map_or(true, |(best_score, _)| score > best_score) {
            best = Some((score, song));
        }
    }
    best.map(|(_, song)| song)
}

impl LyricsSearch for NetEaseClient {
    fn name(&self) -> &'static str {
        "NetEase"
    }

    // NetEase only serves line-timed LRC here, so `enhanced` falls back to it.
    async fn search(&self, query: &str, options: SearchOptions) -> Result<Option<String>, FetchError> {
        let songs = self.search_songs(query).await?;
        let Some(song) = best_song(&songs, query) else {
            return Ok(None);
        };

        tracing::debug!("NetEase picked {} ({})", song.name, song.id);
        let text = self.lyric(song.id).await?;

        if text.trim().is_empty() || (options.synced_only && !lrc::is_synced(&text)) {
            return Ok(None);
        }
        Ok(Some(text))
    }
}
