//! HTTP client initialization.

use std::sync::Arc;

use reqwest::ClientBuilder;

use crate::config::ResolverConfig;

/// Initializes the shared HTTP client used for redirect probes.
///
/// Creates a `reqwest::Client` with redirects disabled so every 3xx response
/// reaches the resolver instead of being followed by the transport. Configured with:
/// - Connect timeout from `connect_timeout_ms`
/// - Read timeout from `read_timeout_ms`
/// - Total request timeout covering connect, write and read budgets
/// - User-Agent header from the configuration
///
/// The returned client owns a connection pool and is safe to share across
/// concurrent resolutions.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_redirect_client(config: &ResolverConfig) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .connect_timeout(config.connect_timeout())
        .read_timeout(config.read_timeout())
        .timeout(config.request_timeout())
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_redirect_client_with_defaults() {
        let client = init_redirect_client(&ResolverConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_redirect_client_does_not_follow() {
        use httptest::{matchers::*, responders::*, Expectation, Server};

        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/start")).respond_with(
                status_code(302).append_header("Location", "/never-requested"),
            ),
        );

        let client = init_redirect_client(&ResolverConfig::default()).expect("client");
        let response = client
            .get(server.url_str("/start"))
            .send()
            .await
            .expect("request should succeed");

        assert_eq!(response.status(), 302);
        assert_eq!(
            response.headers().get("location").and_then(|v| v.to_str().ok()),
            Some("/never-requested")
        );
    }
}
