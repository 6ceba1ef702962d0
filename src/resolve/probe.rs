//! HTTP probing.
//!
//! A probe is a single request with redirect-following disabled, used only to
//! read the status code and `Location` header. Bodies are never read.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

use crate::config::{HTTP_STATUS_METHOD_NOT_ALLOWED, REDIRECT_STATUS_CODES};
use crate::error_handling::{probe_error_from_reqwest, InitializationError, ProbeError};
use crate::initialization::init_redirect_client;
use crate::ResolverConfig;

use super::location::resolve_location;

/// Request method used for a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeMethod {
    /// `HEAD`, the default probe.
    Head,
    /// `GET`, used once when `HEAD` is answered with 405.
    Get,
}

impl ProbeMethod {
    /// HTTP method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeMethod::Head => "HEAD",
            ProbeMethod::Get => "GET",
        }
    }
}

impl From<ProbeMethod> for reqwest::Method {
    fn from(method: ProbeMethod) -> Self {
        match method {
            ProbeMethod::Head => reqwest::Method::HEAD,
            ProbeMethod::Get => reqwest::Method::GET,
        }
    }
}

/// The parts of a raw (unfollowed) HTTP response a probe cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    /// Response status code.
    pub status: u16,
    /// `Location` header, if present and valid UTF-8.
    pub location: Option<String>,
}

impl ProbeResponse {
    /// A response with no `Location` header.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            location: None,
        }
    }

    /// A response carrying a `Location` header.
    pub fn redirect(status: u16, location: impl Into<String>) -> Self {
        Self {
            status,
            location: Some(location.into()),
        }
    }
}

/// HTTP transport used by the resolver.
///
/// Implementations must not follow redirects themselves and must be safe to
/// share across concurrent resolutions.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues one request and reports its status and `Location` header.
    ///
    /// # Errors
    ///
    /// Returns a `ProbeError` when no HTTP response was received (connect
    /// failure, timeout, malformed response, unbuildable request).
    async fn probe(&self, method: ProbeMethod, url: &str) -> Result<ProbeResponse, ProbeError>;
}

/// `reqwest`-backed transport sharing one connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Arc<reqwest::Client>,
}

impl ReqwestTransport {
    /// Wraps an existing client. The client must have redirects disabled.
    pub fn new(client: Arc<reqwest::Client>) -> Self {
        Self { client }
    }

    /// Builds a redirect-less client from the configured timeouts and user agent.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if client creation fails.
    pub fn from_config(config: &ResolverConfig) -> Result<Self, InitializationError> {
        Ok(Self::new(init_redirect_client(config)?))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn probe(&self, method: ProbeMethod, url: &str) -> Result<ProbeResponse, ProbeError> {
        let response = self
            .client
            .request(method.into(), url)
            .send()
            .await
            .map_err(|e| probe_error_from_reqwest(url, &e))?;

        let location = match response.headers().get(reqwest::header::LOCATION) {
            Some(value) => match value.to_str() {
                Ok(location) => Some(location.to_string()),
                Err(_) => {
                    warn!("Ignoring non-UTF-8 Location header from {}", url);
                    None
                }
            },
            None => None,
        };

        Ok(ProbeResponse {
            status: response.status().as_u16(),
            location,
        })
    }
}

/// What one probe says about the next step of the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    /// The probed URL is final.
    NoRedirect,
    /// The server redirected to this absolute URL.
    RedirectTo(String),
    /// HEAD was rejected with 405; the same URL should be probed with GET.
    RetryWithGet,
    /// No response was received; the probed URL stands.
    ErrorUseOriginal(ProbeError),
}

/// Classifies a raw response received for `url` with `method`.
pub fn classify(method: ProbeMethod, url: &str, response: &ProbeResponse) -> RedirectOutcome {
    if response.status == HTTP_STATUS_METHOD_NOT_ALLOWED && method == ProbeMethod::Head {
        return RedirectOutcome::RetryWithGet;
    }

    if REDIRECT_STATUS_CODES.contains(&response.status) {
        match response.location.as_deref() {
            Some(location) => {
                if let Some(next) = resolve_location(url, location) {
                    return RedirectOutcome::RedirectTo(next);
                }
            }
            None => {
                warn!(
                    "Redirect status {} for {} without a usable Location header",
                    response.status,
                    url
                );
            }
        }
    }

    RedirectOutcome::NoRedirect
}

async fn probe_once<T: Transport + ?Sized>(
    transport: &T,
    method: ProbeMethod,
    url: &str,
) -> RedirectOutcome {
    match transport.probe(method, url).await {
        Ok(response) => {
            debug!("{} {} -> {}", method.as_str(), url, response.status);
            classify(method, url, &response)
        }
        Err(e) => RedirectOutcome::ErrorUseOriginal(e),
    }
}

/// Probes `url` with HEAD, falling back to a single GET when HEAD gets a 405.
///
/// Never returns `RedirectOutcome::RetryWithGet`: a 405 on the GET retry is a
/// non-redirect outcome.
pub async fn probe_redirect<T: Transport + ?Sized>(transport: &T, url: &str) -> RedirectOutcome {
    match probe_once(transport, ProbeMethod::Head, url).await {
        RedirectOutcome::RetryWithGet => {
            debug!("HEAD not allowed for {}, retrying with GET", url);
            probe_once(transport, ProbeMethod::Get, url).await
        }
        outcome => outcome,
    }
}
