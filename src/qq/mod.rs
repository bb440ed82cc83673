pub mod decode;
pub mod types;

use crate::config::Config;
use crate::envelope::Meta;
use crate::error::FetchError;
use serde_json::{json, Map, Value};
use std::time::{SystemTime, UNIX_EPOCH};
use types::{ClientSearchResponse, LyricFlags, MusicuRequest, SearchHit};

pub const SOURCE_NAME: &str = "QQ Music";
/// `search_by_type` result count used by the song search helper.
pub const SONG_SEARCH_LIMIT: u32 = 6;

const REFERER: &str = "https://y.qq.com/portal/player.html";
const SEARCH_TYPE_SONG: u32 = 0;

/// The QQ Music endpoints the helpers talk to. Each method returns the raw
/// response body; shaping happens in the free functions below.
#[allow(async_fn_in_trait)]
pub trait QqMusic {
    /// `soso/fcgi-bin/client_search_cp`, one page of song hits.
    async fn search_page(&self, query: &str) -> Result<String, FetchError>;

    /// `lyric/fcgi-bin/fcg_query_lyric_new.fcg` for one song mid.
    async fn lyric_page(&self, song_mid: &str) -> Result<String, FetchError>;

    /// One call against the unified `musicu.fcg` endpoint.
    async fn musicu(&self, request: &MusicuRequest) -> Result<String, FetchError>;
}

pub struct QqMusicClient {
    client: reqwest::Client,
    base_url: String,
    musicu_url: String,
}

impl QqMusicClient {
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.qq_url.clone(),
            musicu_url: config.qq_musicu_url.clone(),
        }
    }
}

impl QqMusic for QqMusicClient {
    async fn search_page(&self, query: &str) -> Result<String, FetchError> {
        let url = format!("{}/soso/fcgi-bin/client_search_cp", self.base_url);
        tracing::debug!("Searching QQ Music for {:?}", query);

        let body = self
            .client
            .get(&url)
            .header(reqwest::header::REFERER, REFERER)
            .query(&[
                ("w", query),
                ("format", "json"),
                ("p", "1"),
                ("n", "1"),
                ("cr", "1"),
                ("t", "0"),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }

    async fn lyric_page(&self, song_mid: &str) -> Result<String, FetchError> {
        let url = format!("{}/lyric/fcgi-bin/fcg_query_lyric_new.fcg", self.base_url);
        tracing::debug!("Fetching QQ Music lyric for {}", song_mid);

        let body = self
            .client
            .get(&url)
            .header(reqwest::header::REFERER, REFERER)
            .query(&[
                ("songmid", song_mid),
                ("format", "json"),
                ("nobase64", "0"),
                ("g_tk", "5381"),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }

    async fn musicu(&self, request: &MusicuRequest) -> Result<String, FetchError> {
        tracing::debug!(
            "Calling QQ Music {}.{}",
            request.req_0.module,
            request.req_0.method
        );

        let body = self
            .client
            .post(&self.musicu_url)
            .header(reqwest::header::REFERER, REFERER)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(body)
    }
}

/// First song of a `client_search_cp` page.
pub fn parse_first_hit(body: &str) -> Result<Option<SearchHit>, FetchError> {
    let response: ClientSearchResponse = serde_json::from_str(decode::strip_callback(body))?;
    if response.code != 0 {
        return Err(FetchError::malformed(format!(
            "search returned code {}",
            response.code
        )));
    }
    let data = response
        .data
        .ok_or_else(|| FetchError::malformed("search response has no data"))?;
    Ok(data.song.list.into_iter().next())
}

/// The `data` object of a successful `musicu.fcg` call.
pub fn parse_musicu_data(body: &str) -> Result<Value, FetchError> {
    let mut response: Value = serde_json::from_str(body)?;

    let top_code = response.get("code").and_then(Value::as_i64).unwrap_or(0);
    if top_code != 0 {
        return Err(FetchError::malformed(format!("musicu returned code {}", top_code)));
    }

    let call = response
        .get_mut("req_0")
        .ok_or_else(|| FetchError::malformed("musicu response has no req_0"))?;
    let code = call.get("code").and_then(Value::as_i64).unwrap_or(0);
    if code != 0 {
        return Err(FetchError::malformed(format!("musicu call returned code {}", code)));
    }

    call.get_mut("data")
        .map(Value::take)
        .ok_or_else(|| FetchError::malformed("musicu call has no data"))
}

fn search_id() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{}", nanos % 10_000_000_000_000_000_000)
}

/// Search, take the first song, fetch and decode its lyrics.
pub async fn fetch_synced_lyrics<Q: QqMusic>(api: &Q, query: &str) -> Result<(String, Meta), FetchError> {
    let body = api.search_page(query).await?;
    let Some(hit) = parse_first_hit(&body)? else {
        return Err(FetchError::SongsNotFound);
    };
    tracing::info!("QQ Music matched {} ({})", hit.songname, hit.songmid);

    let blob = api.lyric_page(&hit.songmid).await?;
    let lyrics = decode::synced_lyrics_from_blob(&blob)?;

    let meta = Meta {
        title: hit.songname.clone(),
        artist: hit.singer_names(),
        album: hit.albumname.clone(),
        source: SOURCE_NAME.to_string(),
    };
    Ok((lyrics, meta))
}

/// `GetPlayLyricInfo` for a song mid, shaped as `{lyric, trans, roma}`.
pub async fn fetch_lyric_by_mid<Q: QqMusic>(
    api: &Q,
    song_mid: &str,
    flags: LyricFlags,
) -> Result<Value, FetchError> {
    let request = MusicuRequest::new(
        "music.musichallSong.PlayLyricInfo",
        "GetPlayLyricInfo",
        json!({
            "songMID": song_mid,
            "crypt": 0,
            "ct": 11,
            "cv": 13012303,
            "lrc_t": 0,
            "qrc": flags.qrc as u8,
            "qrc_t": 0,
            "roma": flags.roma as u8,
            "roma_t": 0,
            "trans": flags.trans as u8,
            "trans_t": 0,
            "type": 1,
        }),
    );

    let data = parse_musicu_data(&api.musicu(&request).await?)?;
    let field = |name: &str| {
        data.get(name)
            .and_then(Value::as_str)
            .map(decode::decode_if_base64)
            .unwrap_or_default()
    };

    let lyric = field("lyric");
    if lyric.trim().is_empty() {
        return Err(FetchError::LyricsNotFound);
    }

    let mut result = Map::new();
    result.insert("lyric".into(), Value::String(lyric));
    result.insert("trans".into(), Value::String(field("trans")));
    result.insert("roma".into(), Value::String(field("roma")));
    Ok(Value::Object(result))
}

/// `DoSearchForQQMusicMobile` song search; the hit list is passed through.
pub async fn search_songs<Q: QqMusic>(api: &Q, keyword: &str, limit: u32) -> Result<Value, FetchError> {
    let request = MusicuRequest::new(
        "music.search.SearchCgiService",
        "DoSearchForQQMusicMobile",
        json!({
            "searchid": search_id(),
            "query": keyword,
            "search_type": SEARCH_TYPE_SONG,
            "num_per_page": limit,
            "page_num": 1,
            "highlight": 1,
            "grp": 1,
        }),
    );

    let mut data = parse_musicu_data(&api.musicu(&request).await?)?;
    let songs = data
        .pointer_mut("/body/item_song")
        .map(Value::take)
        .ok_or_else(|| FetchError::malformed("search data has no body.item_song"))?;

    match songs.as_array() {
        Some(list) if list.is_empty() => Err(FetchError::SongsNotFound),
        Some(list) => {
            tracing::info!("QQ Music returned {} songs for {:?}", list.len(), keyword);
            Ok(songs)
        }
        None => Err(FetchError::malformed("body.item_song is not a list")),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;

    /// In-memory QQ Music with canned bodies.
    #[derive(Default)]
    pub struct FakeQq {
        pub search: Option<String>,
        pub lyric: Option<String>,
        pub musicu: Option<String>,
        pub requests: RefCell<Vec<MusicuRequest>>,
        pub lyric_mids: RefCell<Vec<String>>,
    }

    fn canned(body: &Option<String>) -> Result<String, FetchError> {
        body.clone()
            .ok_or_else(|| FetchError::malformed("no canned response"))
    }

    impl QqMusic for FakeQq {
        async fn search_page(&self, _query: &str) -> Result<String, FetchError> {
            canned(&self.search)
        }

        async fn lyric_page(&self, song_mid: &str) -> Result<String, FetchError> {
            self.lyric_mids.borrow_mut().push(song_mid.to_string());
            canned(&self.lyric)
        }

        async fn musicu(&self, request: &MusicuRequest) -> Result<String, FetchError> {
            self.requests.borrow_mut().push(request.clone());
            canned(&self.musicu)
        }
    }
}
