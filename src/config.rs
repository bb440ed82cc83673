use crate::query::QueryOrder;
use crate::variant::Variant;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";
pub const DEFAULT_LRCLIB_URL: &str = "https://lrclib.net/api";
pub const DEFAULT_NETEASE_URL: &str = "https://music.163.com/api";
pub const DEFAULT_QQ_URL: &str = "https://c.y.qq.com";
pub const DEFAULT_QQ_MUSICU_URL: &str = "https://u.y.qq.com/cgi-bin/musicu.fcg";

/// Runtime settings, read once from `LYRICFETCH_*` environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub timeout: Duration,
    pub user_agent: String,
    pub query_order: Option<QueryOrder>,
    pub bom: Option<bool>,
    pub lrclib_url: String,
    pub netease_url: String,
    pub qq_url: String,
    pub qq_musicu_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            query_order: None,
            bom: None,
            lrclib_url: DEFAULT_LRCLIB_URL.to_string(),
            netease_url: DEFAULT_NETEASE_URL.to_string(),
            qq_url: DEFAULT_QQ_URL.to_string(),
            qq_musicu_url: DEFAULT_QQ_MUSICU_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Invalid values are logged
    /// and replaced by defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(raw) = lookup("LYRICFETCH_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => tracing::warn!("Ignoring invalid LYRICFETCH_TIMEOUT_SECS: {:?}", raw),
            }
        }

        if let Some(ua) = lookup("LYRICFETCH_USER_AGENT").filter(|v| !v.trim().is_empty()) {
            config.user_agent = ua;
        }

        if let Some(raw) = lookup("LYRICFETCH_QUERY_ORDER") {
            match raw.parse::<QueryOrder>() {
                Ok(order) => config.query_order = Some(order),
                Err(e) => tracing::warn!("Ignoring LYRICFETCH_QUERY_ORDER: {}", e),
            }
        }

        if let Some(raw) = lookup("LYRICFETCH_BOM") {
            match parse_flag(&raw) {
                Some(flag) => config.bom = Some(flag),
                None => tracing::warn!("Ignoring invalid LYRICFETCH_BOM: {:?}", raw),
            }
        }

        let urls = [
            ("LYRICFETCH_LRCLIB_URL", &mut config.lrclib_url),
            ("LYRICFETCH_NETEASE_URL", &mut config.netease_url),
            ("LYRICFETCH_QQ_URL", &mut config.qq_url),
            ("LYRICFETCH_QQ_MUSICU_URL", &mut config.qq_musicu_url),
        ];
        for (key, slot) in urls {
            if let Some(url) = lookup(key).filter(|v| !v.trim().is_empty()) {
                *slot = url.trim().trim_end_matches('/').to_string();
            }
        }

        tracing::debug!("Loaded configuration: {:?}", config);
        config
    }

    pub fn query_order_for(&self, variant: Variant) -> QueryOrder {
        self.query_order
            .unwrap_or_else(|| variant.default_query_order())
    }

    pub fn bom_for(&self, variant: Variant) -> bool {
        self.bom.unwrap_or_else(|| variant.default_bom())
    }

    /// Shared HTTP client with the configured timeout and User-Agent.
    pub fn http_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .build()
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.lrclib_url, DEFAULT_LRCLIB_URL);
        assert_eq!(config.query_order_for(Variant::Lyrics), QueryOrder::TitleFirst);
        assert_eq!(config.query_order_for(Variant::QqLyrics), QueryOrder::ArtistFirst);
        assert!(config.bom_for(Variant::QqLyricByMid));
        assert!(!config.bom_for(Variant::QqSongs));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("LYRICFETCH_TIMEOUT_SECS", "3"),
            ("LYRICFETCH_QUERY_ORDER", "title-first"),
            ("LYRICFETCH_BOM", "0"),
            ("LYRICFETCH_QQ_URL", "http://127.0.0.1:8080/"),
        ]));
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.query_order_for(Variant::QqSongs), QueryOrder::TitleFirst);
        assert!(!config.bom_for(Variant::QqLyricByMid));
        assert_eq!(config.qq_url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("LYRICFETCH_TIMEOUT_SECS", "soon"),
            ("LYRICFETCH_QUERY_ORDER", "random"),
            ("LYRICFETCH_BOM", "maybe"),
        ]));
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.query_order, None);
        assert_eq!(config.bom, None);
    }

    #[test]
    fn test_http_client_builds() {
        assert!(Config::default().http_client().is_ok());
    }
}
