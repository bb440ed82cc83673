use crate::api::{self, LyricsSearch, SearchOptions};
use crate::args::Invocation;
use crate::envelope::{Details, Envelope};
use crate::error::FetchError;
use crate::qq::{self, types::LyricFlags, QqMusic};
use crate::query::{build_query, QueryOrder};
use crate::variant::Variant;

/// Title, artist and the search string derived from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub title: String,
    pub artist: Option<String>,
    pub query: String,
}

impl Lookup {
    pub fn new(invocation: &Invocation, order: QueryOrder) -> Self {
        Self {
            title: invocation.title.clone(),
            artist: invocation.artist.clone(),
            query: build_query(&invocation.title, invocation.artist.as_deref(), order),
        }
    }

    pub fn failure(&self, err: &FetchError) -> Envelope {
        tracing::info!("Lookup for {:?} failed: {:?}", self.query, err);
        Envelope::from_error(err, &self.query, &self.title, self.artist.as_deref())
    }
}

pub fn missing_arguments(variant: Variant, received: usize) -> Envelope {
    let err = FetchError::MissingArguments { received };
    Envelope::failure_with_details(
        err.to_string(),
        Details {
            expected: Some(variant.usage()),
            received: Some(received),
            message: err.diagnostic(),
            ..Default::default()
        },
    )
}

/// Synchronized, enhanced lyrics from the provider chain.
pub async fn fetch_lyrics<P: LyricsSearch>(providers: &[P], lookup: &Lookup) -> Envelope {
    match api::search_chain(providers, &lookup.query, SearchOptions::default()).await {
        Ok(Some(lyrics)) => Envelope::lyrics(lyrics),
        Ok(None) => lookup.failure(&FetchError::LyricsNotFound),
        Err(e) => lookup.failure(&e),
    }
}

/// Synchronized lyrics plus track metadata straight from QQ Music.
pub async fn fetch_qq_lyrics<Q: QqMusic>(api: &Q, lookup: &Lookup) -> Envelope {
    match qq::fetch_synced_lyrics(api, &lookup.query).await {
        Ok((lyrics, meta)) => Envelope::lyrics(lyrics).with_meta(meta),
        Err(e) => lookup.failure(&e),
    }
}

/// Raw QQ Music lyric tracks for a known song mid.
pub async fn fetch_qq_lyric_by_mid<Q: QqMusic>(api: &Q, song_mid: &str) -> Envelope {
    match qq::fetch_lyric_by_mid(api, song_mid, LyricFlags::default()).await {
        Ok(result) => Envelope::result(result),
        Err(e) => {
            tracing::info!("Lyric lookup for mid {} failed: {:?}", song_mid, e);
            Envelope::from_id_error(&e, song_mid)
        }
    }
}

/// Candidate songs from QQ Music search.
pub async fn fetch_qq_songs<Q: QqMusic>(api: &Q, lookup: &Lookup) -> Envelope {
    match qq::search_songs(api, &lookup.query, qq::SONG_SEARCH_LIMIT).await {
        Ok(songs) => Envelope::result(songs),
        Err(e) => lookup.failure(&e),
    }
}
