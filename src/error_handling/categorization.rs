//! Error categorization.
//!
//! Maps `reqwest::Error` values onto [`ProbeFailureKind`] so log lines and
//! statistics say what kind of transport failure a probe hit.

use super::types::{ProbeError, ProbeFailureKind};

/// Categorizes a `reqwest::Error` into a `ProbeFailureKind`.
///
/// Redirect-following is disabled on the probe client and response bodies are
/// never read, so only the connection-level predicates matter here.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ProbeFailureKind {
    if error.is_builder() {
        ProbeFailureKind::Builder
    } else if error.is_timeout() {
        ProbeFailureKind::Timeout
    } else if error.is_connect() {
        ProbeFailureKind::Connect
    } else if error.is_request() {
        ProbeFailureKind::Request
    } else {
        ProbeFailureKind::Other
    }
}

/// Builds a [`ProbeError`] for `url` from a `reqwest::Error`.
pub fn probe_error_from_reqwest(url: &str, error: &reqwest::Error) -> ProbeError {
    ProbeError::new(categorize_reqwest_error(error), url, error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unparseable_url_is_builder_error() {
        let client = reqwest::Client::new();
        let err = client
            .head("not a url")
            .send()
            .await
            .expect_err("request to an unparseable URL must fail");
        assert_eq!(categorize_reqwest_error(&err), ProbeFailureKind::Builder);

        let probe_err = probe_error_from_reqwest("not a url", &err);
        assert_eq!(probe_err.kind, ProbeFailureKind::Builder);
        assert_eq!(probe_err.url, "not a url");
    }

    #[tokio::test]
    async fn test_refused_connection_is_connect_error() {
        // Bind then drop a listener so the port is known to be closed.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);

        let client = reqwest::Client::new();
        let err = client
            .head(format!("http://{}/", addr))
            .send()
            .await
            .expect_err("closed port must refuse");
        assert_eq!(categorize_reqwest_error(&err), ProbeFailureKind::Connect);
    }
}
