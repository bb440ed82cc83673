use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `client_search_cp` response.
#[derive(Debug, Deserialize)]
pub struct ClientSearchResponse {
    #[serde(default)]
    pub code: i64,
    pub data: Option<ClientSearchData>,
}

#[derive(Debug, Deserialize)]
pub struct ClientSearchData {
    pub song: ClientSearchSongs,
}

#[derive(Debug, Deserialize)]
pub struct ClientSearchSongs {
    #[serde(default)]
    pub list: Vec<SearchHit>,
}

/// One song from the web search.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SearchHit {
    pub songmid: String,
    #[serde(default)]
    pub songname: String,
    #[serde(default)]
    pub albumname: String,
    #[serde(default)]
    pub singer: Vec<Singer>,
}

impl SearchHit {
    pub fn singer_names(&self) -> String {
        self.singer
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Singer {
    pub name: String,
}

/// `fcg_query_lyric_new` response once the callback wrapper is gone.
#[derive(Debug, Deserialize)]
pub struct LyricBlob {
    #[serde(default)]
    pub retcode: i64,
    #[serde(default)]
    pub lyric: String,
}

/// Envelope for a single call to the unified `musicu.fcg` endpoint.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MusicuRequest {
    pub comm: MusicuComm,
    pub req_0: MusicuCall,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MusicuComm {
    pub ct: u32,
    pub cv: u32,
    pub v: u32,
    #[serde(rename = "tmeAppID")]
    pub tme_app_id: &'static str,
    pub format: &'static str,
    pub in_charset: &'static str,
    pub out_charset: &'static str,
}

impl Default for MusicuComm {
    fn default() -> Self {
        Self {
            ct: 11,
            cv: 13020508,
            v: 13020508,
            tme_app_id: "qqmusic",
            format: "json",
            in_charset: "utf-8",
            out_charset: "utf-8",
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MusicuCall {
    pub module: &'static str,
    pub method: &'static str,
    pub param: Value,
}

impl MusicuRequest {
    pub fn new(module: &'static str, method: &'static str, param: Value) -> Self {
        Self {
            comm: MusicuComm::default(),
            req_0: MusicuCall {
                module,
                method,
                param,
            },
        }
    }
}

/// Which lyric tracks to ask `GetPlayLyricInfo` for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LyricFlags {
    pub qrc: bool,
    pub trans: bool,
    pub roma: bool,
}

impl Default for LyricFlags {
    fn default() -> Self {
        Self {
            qrc: true,
            trans: false,
            roma: false,
        }
    }
}
