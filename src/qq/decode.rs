//! Unwrapping and decoding of QQ Music lyric payloads.

use super::types::LyricBlob;
use crate::error::FetchError;
use crate::lrc;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;

/// Strip a JSONP wrapper such as `MusicJsonCallback({...});`.
/// Text without one is returned trimmed but otherwise untouched.
pub fn strip_callback(body: &str) -> &str {
    let trimmed = body.trim();
    let Some(open) = trimmed.find('(') else {
        return trimmed;
    };

    let name = &trimmed[..open];
    let is_callback_name = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == '.');
    if !is_callback_name {
        return trimmed;
    }

    let rest = trimmed[open + 1..].trim_end().trim_end_matches(';').trim_end();
    match rest.strip_suffix(')') {
        Some(inner) => inner.trim(),
        None => trimmed,
    }
}

/// Base64 payload to UTF-8 text.
pub fn decode_base64_text(payload: &str) -> Result<String, FetchError> {
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64_STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| FetchError::decode(format!("base64: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| FetchError::decode(format!("utf-8: {}", e)))
}

/// Whether the whole field has the shape of one padded base64 token.
fn looks_like_base64(field: &str) -> bool {
    field.len() % 4 == 0
        && field
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/' || b == b'=')
}

/// Decode when the field is base64 of UTF-8 text, otherwise pass it through.
pub fn decode_if_base64(field: &str) -> String {
    let token = field.trim();
    if !looks_like_base64(token) {
        return field.to_string();
    }
    decode_base64_text(token).unwrap_or_else(|_| field.to_string())
}

/// QQ Music escapes a handful of HTML entities inside lyric text.
pub fn unescape_entities(text: &str) -> String {
    const ENTITIES: [(&str, &str); 7] = [
        ("&apos;", "'"),
        ("&#39;", "'"),
        ("&quot;", "\""),
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&nbsp;", " "),
        ("&amp;", "&"),
    ];

    let mut result = text.to_string();
    for (entity, replacement) in ENTITIES {
        result = result.replace(entity, replacement);
    }
    result
}

/// Full path from a raw `fcg_query_lyric_new` body to synchronized lyrics.
pub fn synced_lyrics_from_blob(body: &str) -> Result<String, FetchError> {
    let json = strip_callback(body);
    let blob: LyricBlob = serde_json::from_str(json)?;

    if blob.lyric.trim().is_empty() {
        tracing::debug!("Lyric blob empty (retcode {})", blob.retcode);
        return Err(FetchError::LyricsNotFound);
    }

    let text = unescape_entities(&decode_base64_text(&blob.lyric)?);
    if !lrc::has_sync_marker(&text) {
        return Err(FetchError::NotSynchronized);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(text: &str) -> String {
        BASE64_STANDARD.encode(text)
    }

    #[test]
    fn test_strip_callback() {
        assert_eq!(strip_callback(r#"MusicJsonCallback({"a": 1})"#), r#"{"a": 1}"#);
        assert_eq!(strip_callback(" jsonp1({\"a\": 1});\n"), "{\"a\": 1}");
        assert_eq!(strip_callback(r#"{"a": "(x)"}"#), r#"{"a": "(x)"}"#);
        assert_eq!(strip_callback("no json here"), "no json here");
    }

    #[test]
    fn test_decode_base64_text() {
        assert_eq!(decode_base64_text(&encode("[00:01.00]hi")).unwrap(), "[00:01.00]hi");
        assert!(matches!(
            decode_base64_text("!!not base64!!"),
            Err(FetchError::Decode { .. })
        ));
        // Valid base64, invalid UTF-8.
        assert!(matches!(
            decode_base64_text(&BASE64_STANDARD.encode([0xff, 0xfe, 0xfd])),
            Err(FetchError::Decode { .. })
        ));
    }

    #[test]
    fn test_decode_if_base64_passthrough() {
        assert_eq!(decode_if_base64(&encode("[00:00.00]x")), "[00:00.00]x");
        assert_eq!(decode_if_base64("plain words"), "plain words");
        assert_eq!(decode_if_base64(""), "");
    }

    #[test]
    fn test_plain_text_that_decodes_is_kept() {
        // "aiwo" is valid base64 for "j,(" once the space is dropped.
        assert_eq!(decode_if_base64("ai wo"), "ai wo");
        assert_eq!(decode_if_base64("[00:01.00]ai wo"), "[00:01.00]ai wo");
        assert_eq!(decode_if_base64(&format!("{}\n", encode("ai wo"))), "ai wo");
    }

    #[test]
    fn test_unescape_entities() {
        assert_eq!(unescape_entities("Don&apos;t &amp; won&#39;t"), "Don't & won't");
    }

    #[test]
    fn test_synced_blob_accepted() {
        let body = format!(
            "MusicJsonCallback({{\"retcode\":0,\"code\":0,\"lyric\":\"{}\"}})",
            encode("[ti:Yesterday]\n[00:02.10]Yesterday")
        );
        let text = synced_lyrics_from_blob(&body).unwrap();
        assert!(text.contains("[00:02.10]Yesterday"));
    }

    #[test]
    fn test_unsynced_blob_rejected() {
        let body = format!(
            "{{\"retcode\":0,\"lyric\":\"{}\"}}",
            encode("Yesterday, all my troubles seemed so far away")
        );
        assert!(matches!(
            synced_lyrics_from_blob(&body),
            Err(FetchError::NotSynchronized)
        ));
    }

    #[test]
    fn test_empty_blob_is_not_found() {
        let body = r#"MusicJsonCallback({"retcode":-1901,"code":-1901,"lyric":""})"#;
        assert!(matches!(
            synced_lyrics_from_blob(body),
            Err(FetchError::LyricsNotFound)
        ));
    }

    #[test]
    fn test_garbage_blob_is_malformed() {
        assert!(matches!(
            synced_lyrics_from_blob("<html>blocked</html>"),
            Err(FetchError::MalformedResponse { .. })
        ));
    }
}
