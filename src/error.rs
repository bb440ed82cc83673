use thiserror::Error;

/// Every way a lookup can fail. Each variant maps to one `error` string in
/// the envelope handed back to the caller.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Missing arguments")]
    MissingArguments { received: usize },

    #[error("No lyrics found")]
    LyricsNotFound,

    #[error("No Songs found")]
    SongsNotFound,

    #[error("No synchronized lyrics found")]
    NotSynchronized,

    #[error("Request timed out")]
    Timeout(#[source] reqwest::Error),

    #[error("Network error")]
    Network(#[source] reqwest::Error),

    #[error("Unexpected response format")]
    MalformedResponse { reason: String },

    #[error("Failed to decode lyrics")]
    Decode { reason: String },
}

impl FetchError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            reason: reason.into(),
        }
    }

    /// Category name reported as `details.exception_type`.
    /// Only transport and decoding failures carry one.
    pub fn exception_type(&self) -> Option<&'static str> {
        match self {
            FetchError::Timeout(_) => Some("Timeout"),
            FetchError::Network(_) => Some("NetworkError"),
            FetchError::MalformedResponse { .. } => Some("MalformedResponse"),
            FetchError::Decode { .. } => Some("DecodeError"),
            _ => None,
        }
    }

    /// Human-readable diagnostic for `details.message`.
    pub fn diagnostic(&self) -> String {
        match self {
            FetchError::MissingArguments { .. } => {
                "Script requires at least song title argument".to_string()
            }
            FetchError::LyricsNotFound => {
                "Could not find lyrics. Try different artist name or title.".to_string()
            }
            FetchError::SongsNotFound => {
                "Could not find songs. Try different artist name or title.".to_string()
            }
            FetchError::NotSynchronized => {
                "Lyrics were found but carry no timestamps".to_string()
            }
            FetchError::Timeout(e) | FetchError::Network(e) => {
                format!("An error occurred while fetching lyrics: {}", e)
            }
            FetchError::MalformedResponse { reason } => {
                format!("Upstream returned an unexpected response: {}", reason)
            }
            FetchError::Decode { reason } => format!("Could not decode lyrics: {}", reason),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout(e)
        } else if e.is_decode() {
            FetchError::malformed(e.to_string())
        } else {
            FetchError::Network(e)
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::malformed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_strings_are_distinct() {
        let errors = [
            FetchError::MissingArguments { received: 0 },
            FetchError::LyricsNotFound,
            FetchError::SongsNotFound,
            FetchError::NotSynchronized,
            FetchError::malformed("x"),
            FetchError::decode("x"),
        ];
        let mut names: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), errors.len());
    }

    #[test]
    fn test_exception_type_only_on_failures_with_a_cause() {
        assert_eq!(FetchError::LyricsNotFound.exception_type(), None);
        assert_eq!(FetchError::NotSynchronized.exception_type(), None);
        assert_eq!(
            FetchError::decode("bad base64").exception_type(),
            Some("DecodeError")
        );
        assert_eq!(
            FetchError::malformed("no list").exception_type(),
            Some("MalformedResponse")
        );
    }

    #[test]
    fn test_json_error_is_malformed_response() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let fetch: FetchError = err.into();
        assert_eq!(fetch.to_string(), "Unexpected response format");
    }
}
