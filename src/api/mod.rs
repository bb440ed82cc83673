pub mod netease;
pub mod types;

use crate::config::Config;
use crate::error::FetchError;
use crate::{lrc, normalize};
use netease::NetEaseClient;
use reqwest::StatusCode;
use types::LrcLibTrack;

/// What the caller wants back from a lyrics search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Reject results without line timestamps.
    pub synced_only: bool,
    /// Prefer word-timed lyrics when the provider has them.
    pub enhanced: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            synced_only: true,
            enhanced: true,
        }
    }
}

/// A source of lyrics addressed by a free-form query.
#[allow(async_fn_in_trait)]
pub trait LyricsSearch {
    fn name(&self) -> &'static str;

    /// `Ok(None)` means the provider answered but had nothing suitable.
    async fn search(&self, query: &str, options: SearchOptions) -> Result<Option<String>, FetchError>;
}

/// Ask each provider in turn; the first hit wins.
///
/// Provider failures do not stop the chain. When nothing is found the
/// result is not-found if any provider answered cleanly, otherwise the
/// first failure.
pub async fn search_chain<P: LyricsSearch>(
    providers: &[P],
    query: &str,
    options: SearchOptions,
) -> Result<Option<String>, FetchError> {
    let mut first_error = None;
    let mut answered = false;

    for provider in providers {
        match provider.search(query, options).await {
            Ok(Some(lyrics)) => {
                tracing::info!("{} returned lyrics for {:?}", provider.name(), query);
                return Ok(Some(lyrics));
            }
            Ok(None) => {
                tracing::debug!("{} has no lyrics for {:?}", provider.name(), query);
                answered = true;
            }
            Err(e) => {
                tracing::warn!("{} failed for {:?}: {:?}", provider.name(), query, e);
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    match first_error {
        Some(e) if !answered => Err(e),
        _ => Ok(None),
    }
}

/// Pick the lyrics text a candidate would contribute under `options`.
fn usable_lyrics(track: &LrcLibTrack, options: SearchOptions) -> Option<&str> {
    if track.instrumental {
        return None;
    }

    let synced = track
        .synced_lyrics
        .as_deref()
        .filter(|text| lrc::is_synced(text));
    if synced.is_some() || options.synced_only {
        return synced;
    }

    track
        .plain_lyrics
        .as_deref()
        .filter(|text| !text.trim().is_empty())
}

/// Choose the best LRCLIB candidate for `query`.
pub fn select_lrclib(tracks: &[LrcLibTrack], query: &str, options: SearchOptions) -> Option<String> {
    let mut best: Option<(bool, f64, &str)> = None;

    for track in tracks {
        let Some(text) = usable_lyrics(track, options) else {
            continue;
        };
        let enhanced = options.enhanced && lrc::is_enhanced(text);
        let score = normalize::match_score(query, &track.track_name, &track.artist_name);

        let better = match best {
            None => true,
            Some((best_enhanced, best_score, _)) => {
                (enhanced, score) > (best_enhanced, best_score)
            }
        };
        if better {
            best = Some((enhanced, score, text));
        }
    }

    best.map(|(_, _, text)| text.to_string())
}

const LRCLIB_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub struct LrcLibClient {
    client: reqwest::Client,
    base_url: String,
}

impl LrcLibClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Search LRCLIB by free-form query.
    /// Returns an empty list if nothing matches (404)
    pub async fn search_tracks(&self, query: &str) -> Result<Vec<LrcLibTrack>, FetchError> {
        let url = format!("{}/search?q={}", self.base_url, urlencoding::encode(query));

        tracing::debug!("Searching LRCLIB: {}", url);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, LRCLIB_USER_AGENT)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json::<Vec<LrcLibTrack>>().await?),
            StatusCode::NOT_FOUND => Ok(Vec::new()),
            _ => {
                let status_error = response.error_for_status().err();
                Err(status_error.map(FetchError::from).unwrap_or_else(|| {
                    FetchError::malformed("unexpected status code from LRCLIB")
                }))
            }
        }
    }
}

impl LyricsSearch for LrcLibClient {
    fn name(&self) -> &'static str {
        "LRCLIB"
    }

    async fn search(&self, query: &str, options: SearchOptions) -> Result<Option<String>, FetchError> {
        let tracks = self.search_tracks(query).await?;
        tracing::debug!("LRCLIB returned {} candidates", tracks.len());
        Ok(select_lrclib(&tracks, query, options))
    }
}

/// The built-in providers behind the generic lyrics search.
pub enum Provider {
    LrcLib(LrcLibClient),
    NetEase(NetEaseClient),
}

impl LyricsSearch for Provider {
    fn name(&self) -> &'static str {
        match self {
            Provider::LrcLib(p) => p.name(),
            Provider::NetEase(p) => p.name(),
        }
    }

    async fn search(&self, query: &str, options: SearchOptions) -> Result<Option<String>, FetchError> {
        match self {
            Provider::LrcLib(p) => p.search(query, options).await,
            Provider::NetEase(p) => p.search(query, options).await,
        }
    }
}

/// LRCLIB first, then NetEase Cloud Music.
pub fn default_providers(client: &reqwest::Client, config: &Config) -> Vec<Provider> {
    vec![
        Provider::LrcLib(LrcLibClient::new(client.clone(), config.lrclib_url.clone())),
        Provider::NetEase(NetEaseClient::new(client.clone(), config.netease_url.clone())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn track(title: &str, artist: &str, synced: Option<&str>, plain: Option<&str>) -> LrcLibTrack {
        LrcLibTrack {
            track_name: title.to_string(),
            artist_name: artist.to_string(),
            instrumental: false,
            synced_lyrics: synced.map(str::to_string),
            plain_lyrics: plain.map(str::to_string),
        }
    }

    #[test]
    fn test_select_prefers_best_match() {
        let tracks = vec![
            track("Bohemian Rhapsody (Cover)", "Some Band", Some("[00:01.00]cover"), None),
            track("Bohemian Rhapsody", "Queen", Some("[00:01.00]original"), None),
        ];
        let picked = select_lrclib(&tracks, "Bohemian Rhapsody Queen", SearchOptions::default());
        assert_eq!(picked.as_deref(), Some("[00:01.00]original"));
    }

    #[test]
    fn test_select_skips_unsynced_when_synced_only() {
        let tracks = vec![track("Yesterday", "The Beatles", None, Some("Yesterday..."))];
        assert_eq!(select_lrclib(&tracks, "Yesterday", SearchOptions::default()), None);

        let relaxed = SearchOptions {
            synced_only: false,
            enhanced: false,
        };
        assert_eq!(
            select_lrclib(&tracks, "Yesterday", relaxed).as_deref(),
            Some("Yesterday...")
        );
    }

    #[test]
    fn test_select_prefers_enhanced() {
        let tracks = vec![
            track("Song", "Artist", Some("[00:01.00]line"), None),
            track("Song (Live)", "Artist", Some("[00:01.00]<00:01.00>word"), None),
        ];
        let picked = select_lrclib(&tracks, "Song Artist", SearchOptions::default());
        assert_eq!(picked.as_deref(), Some("[00:01.00]<00:01.00>word"));
    }

    #[test]
    fn test_select_skips_instrumentals() {
        let mut instrumental = track("Song", "Artist", Some("[00:00.00]"), None);
        instrumental.instrumental = true;
        assert_eq!(select_lrclib(&[instrumental], "Song", SearchOptions::default()), None);
    }

    struct Fake {
        answer: fn() -> Result<Option<String>, FetchError>,
        calls: Cell<usize>,
    }

    impl Fake {
        fn new(answer: fn() -> Result<Option<String>, FetchError>) -> Self {
            Self {
                answer,
                calls: Cell::new(0),
            }
        }
    }

    impl LyricsSearch for Fake {
        fn name(&self) -> &'static str {
            "fake"
        }

        async fn search(&self, _query: &str, _options: SearchOptions) -> Result<Option<String>, FetchError> {
            self.calls.set(self.calls.get() + 1);
            (self.answer)()
        }
    }

    #[tokio::test]
    async fn test_chain_stops_at_first_hit() {
        let providers = [
            Fake::new(|| Ok(None)),
            Fake::new(|| Ok(Some("[00:00.00]hit".into()))),
            Fake::new(|| Ok(Some("[00:00.00]late".into()))),
        ];
        let found = search_chain(&providers, "q", SearchOptions::default())
            .await
            .unwrap();
        assert_eq!(found.as_deref(), Some("[00:00.00]hit"));
        assert_eq!(providers[2].calls.get(), 0);
    }

    #[tokio::test]
    async fn test_chain_reports_not_found_if_any_provider_answered() {
        let providers = [
            Fake::new(|| Err(FetchError::malformed("bad"))),
            Fake::new(|| Ok(None)),
        ];
        let found = search_chain(&providers, "q", SearchOptions::default())
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_chain_reports_first_error_when_all_fail() {
        let providers = [
            Fake::new(|| Err(FetchError::decode("first"))),
            Fake::new(|| Err(FetchError::malformed("second"))),
        ];
        let err = search_chain(&providers, "q", SearchOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[test]
    fn test_lrclib_user_agent() {
        assert_eq!(LRCLIB_USER_AGENT, format!("lyricfetch/{}", env!("CARGO_PKG_VERSION")));
    }
}
