use crate::error::FetchError;
use serde::Serialize;
use serde_json::Value;

/// The single JSON document written to stdout.
///
/// Built only through its constructors so `success` always agrees with the
/// payload, and a success payload never travels with an `error`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Envelope {
    success: bool,
    #[serde(flatten)]
    outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    meta: Option<Meta>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
enum Outcome {
    Lyrics {
        lyrics: String,
    },
    Result {
        result: Value,
    },
    Failure {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<Details>,
    },
}

/// Diagnostic context attached to a failure.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct Details {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception_type: Option<String>,
    pub message: String,
}

/// Track metadata reported next to lyrics found on QQ Music.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Meta {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub source: String,
}

impl Envelope {
    pub fn lyrics(lyrics: impl Into<String>) -> Self {
        Self {
            success: true,
            outcome: Outcome::Lyrics {
                lyrics: lyrics.into(),
            },
            meta: None,
        }
    }

    pub fn result(result: Value) -> Self {
        Self {
            success: true,
            outcome: Outcome::Result { result },
            meta: None,
        }
    }

    pub fn failure_with_details(error: impl Into<String>, details: Details) -> Self {
        Self {
            success: false,
            outcome: Outcome::Failure {
                error: error.into(),
                details: Some(details),
            },
            meta: None,
        }
    }

    /// Failure envelope for a lookup error, echoing the query that caused it.
    pub fn from_error(err: &FetchError, query: &str, title: &str, artist: Option<&str>) -> Self {
        let details = Details {
            query: Some(query.to_string()),
            title: Some(title.to_string()),
            artist: Some(artist.unwrap_or("unknown").to_string()),
            exception_type: err.exception_type().map(str::to_string),
            message: err.diagnostic(),
            ..Default::default()
        };
        Self::failure_with_details(err.to_string(), details)
    }

    /// Failure for a lookup keyed by an opaque id rather than title/artist.
    pub fn from_id_error(err: &FetchError, id: &str) -> Self {
        let details = Details {
            query: Some(id.to_string()),
            exception_type: err.exception_type().map(str::to_string),
            message: err.diagnostic(),
            ..Default::default()
        };
        Self::failure_with_details(err.to_string(), details)
    }

    /// Meta is only meaningful next to a successful payload.
    pub fn with_meta(mut self, meta: Meta) -> Self {
        if self.success {
            self.meta = Some(meta);
        }
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Failure { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn details(&self) -> Option<&Details> {
        match &self.outcome {
            Outcome::Failure { details, .. } => details.as_ref(),
            _ => None,
        }
    }

    pub fn lyrics_text(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Lyrics { lyrics } => Some(lyrics),
            _ => None,
        }
    }

    pub fn result_value(&self) -> Option<&Value> {
        match &self.outcome {
            Outcome::Result { result } => Some(result),
            _ => None,
        }
    }

    pub fn meta(&self) -> Option<&Meta> {
        self.meta.as_ref()
    }
}
