//! Deep-link wrapper unwrapping.
//!
//! App-link redirectors embed the real destination in an `$original_url` query
//! parameter instead of answering with an HTTP redirect. The `$` prefix is not
//! something generic query parsers handle consistently, so the raw query string
//! is scanned by hand.

use log::{debug, warn};
use url::Url;

use crate::config::APP_LINK_PARAM_PREFIXES;
use crate::error_handling::DecodeError;

/// Finds the raw (still percent-encoded) `original_url` value in a query string.
///
/// `$original_url=` wins over `original_url=` regardless of position; within one
/// form the first occurrence is used.
pub fn extract_original_url(query: &str) -> Option<&str> {
    APP_LINK_PARAM_PREFIXES.iter().find_map(|prefix| {
        query
            .split('&')
            .find_map(|pair| pair.strip_prefix(prefix))
    })
}

/// Percent-decodes a query component using form semantics (`+` is a space).
///
/// # Errors
///
/// Returns `DecodeError::MalformedEscape` for a `%` not followed by two hex
/// digits, `DecodeError::InvalidUtf8` if the bytes are not UTF-8, and
/// `DecodeError::Empty` if the decoded value is empty.
pub fn decode_component(raw: &str) -> Result<String, DecodeError> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return Err(DecodeError::MalformedEscape(i));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    let spaced = raw.replace('+', " ");
    let decoded = urlencoding::decode(&spaced).map_err(|_| DecodeError::InvalidUtf8)?;
    if decoded.is_empty() {
        return Err(DecodeError::Empty);
    }
    Ok(decoded.into_owned())
}

/// Returns the decoded destination embedded in an app-link URL, if any.
///
/// `None` means the caller should fall back to probing the wrapper URL itself.
pub fn unwrap_app_link(url: &Url) -> Option<String> {
    let query = url.query().unwrap_or("");
    let Some(raw) = extract_original_url(query) else {
        warn!("No $original_url parameter found on {}. Query: {}", url, query);
        return None;
    };

    match decode_component(raw) {
        Ok(target) => {
            debug!("Extracted original URL from app link: {}", target);
            Some(target)
        }
        Err(e) => {
            warn!("Failed to decode original_url on {}: {}", url, e);
            None
        }
    }
}
