//! `Location` header resolution.

use log::warn;
use url::Url;

/// Resolves a `Location` header value against the URL that returned it.
///
/// Absolute values are returned exactly as sent (no case folding or port
/// normalisation), so a server redirecting to the same string is recognised as
/// a self-redirect. Relative values (`/path?q=1`, `next`, `//host/path`) are
/// joined onto `base`. Returns `None` for an empty value or one that cannot be
/// turned into an absolute URL, which the caller treats as "no usable redirect".
pub fn resolve_location(base: &str, location: &str) -> Option<String> {
    let location = location.trim();
    if location.is_empty() {
        return None;
    }

    if Url::parse(location).is_ok() {
        return Some(location.to_string());
    }

    match Url::parse(base).and_then(|base| base.join(location)) {
        Ok(resolved) => Some(resolved.to_string()),
        Err(e) => {
            warn!(
                "Failed to resolve Location '{}' against '{}': {}",
                location, base, e
            );
            None
        }
    }
}
