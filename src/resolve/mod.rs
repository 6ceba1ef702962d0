//! Redirect chain resolution.
//!
//! [`RedirectResolver`] follows a URL through HTTP redirects and app-link
//! wrappers until it reaches a terminal domain, a non-redirect response, or the
//! hop limit. Resolution never fails: every error degrades to the best URL
//! known so far.
//!
//! Hops are strictly sequential because each probe's target is the previous
//! probe's `Location`. The only await points are the probes themselves, and each
//! loop iteration starts with a cancellation check.

mod app_link;
mod location;
mod probe;


use std::sync::Arc;

use futures::stream::{self, StreamExt};
use log::{debug, warn};
use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::error_handling::{ConfigError, InitializationError, ProbeFailureKind};
use crate::ResolverConfig;

pub use app_link::{decode_component, extract_original_url, unwrap_app_link};
pub use location::resolve_location;
pub use probe::{
    classify, probe_redirect, ProbeMethod, ProbeResponse, RedirectOutcome, ReqwestTransport,
    Transport,
};

/// Why a resolution stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The current host is in the terminal-domain set.
    TerminalDomain,
    /// The last probe returned a non-redirect response, or redirected to itself.
    NoRedirect,
    /// The hop limit was exhausted.
    HopLimit,
    /// The last probe received no response.
    ProbeFailed,
    /// The current URL is not http(s) and is not probed.
    NonHttpScheme,
    /// The caller cancelled the resolution.
    Cancelled,
}

impl StopReason {
    /// Human-readable name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            StopReason::TerminalDomain => "terminal domain",
            StopReason::NoRedirect => "no redirect",
            StopReason::HopLimit => "hop limit",
            StopReason::ProbeFailed => "probe failed",
            StopReason::NonHttpScheme => "non-http scheme",
            StopReason::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one resolution, with the path taken to reach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Best-known destination URL
    pub final_url: String,
    /// Hops taken (probe redirects plus app-link unwraps)
    pub hops: usize,
    /// Every URL visited, starting with the input and ending with `final_url`
    pub chain: Vec<String>,
    /// Why resolution stopped
    pub stop_reason: StopReason,
    /// Kind of transport failure absorbed on the last probe, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe_failure: Option<ProbeFailureKind>,
}

/// Per-call working state. Never shared between resolutions.
struct ResolutionState {
    current: String,
    hops: usize,
    chain: Vec<String>,
}

impl ResolutionState {
    fn new(start_url: &str) -> Self {
        Self {
            current: start_url.to_string(),
            hops: 0,
            chain: vec![start_url.to_string()],
        }
    }

    fn advance(&mut self, next: String) {
        self.hops += 1;
        self.chain.push(next.clone());
        self.current = next;
    }

    fn finish(self, stop_reason: StopReason) -> Resolution {
        Resolution {
            final_url: self.current,
            hops: self.hops,
            chain: self.chain,
            stop_reason,
            probe_failure: None,
        }
    }
}

/// Follows redirect chains to their destination.
///
/// Cheap to clone: the configuration and transport are shared behind `Arc`s, so
/// one resolver (and one connection pool) can serve many concurrent calls.
///
/// # Examples
///
/// ```no_run
/// use link_resolver::{RedirectResolver, ResolverConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let resolver = RedirectResolver::from_config(ResolverConfig::default())?;
/// let url = resolver.resolve("https://click.redditmail.com/CL0/abc").await;
/// println!("{}", url);
/// # Ok(())
/// # }
/// ```
pub struct RedirectResolver<T: Transport + ?Sized = ReqwestTransport> {
    config: Arc<ResolverConfig>,
    transport: Arc<T>,
}

impl<T: Transport + ?Sized> Clone for RedirectResolver<T> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl RedirectResolver<ReqwestTransport> {
    /// Builds a resolver backed by a redirect-less `reqwest` client.
    ///
    /// # Errors
    ///
    /// Returns an `InitializationError` if the configuration is invalid or the
    /// HTTP client cannot be created.
    pub fn from_config(config: ResolverConfig) -> Result<Self, InitializationError> {
        let transport = ReqwestTransport::from_config(&config)?;
        Ok(Self::new(config, Arc::new(transport))?)
    }
}

impl<T: Transport + ?Sized> RedirectResolver<T> {
    /// Builds a resolver over any transport.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the configuration is invalid.
    pub fn new(config: ResolverConfig, transport: Arc<T>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            transport,
        })
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves `start_url` to its best-known destination.
    ///
    /// Always returns a URL string: the original input if nothing could be
    /// resolved, otherwise the last URL reached.
    pub async fn resolve(&self, start_url: &str) -> String {
        self.resolve_traced(start_url).await.final_url
    }

    /// Resolves `start_url` and reports the chain and stop reason.
    pub async fn resolve_traced(&self, start_url: &str) -> Resolution {
        self.resolve_with_cancel(start_url, &CancellationToken::new())
            .await
    }

    /// Resolves `start_url`, stopping with the current URL once `cancel` fires.
    ///
    /// Cancellation is observed at the start of every hop and while a probe is
    /// in flight.
    pub async fn resolve_with_cancel(
        &self,
        start_url: &str,
        cancel: &CancellationToken,
    ) -> Resolution {
        debug!("Starting redirect resolution for: {}", start_url);
        let mut state = ResolutionState::new(start_url);

        while state.hops < self.config.max_hops {
            if cancel.is_cancelled() {
                debug!("Cancelled at hop {}, returning {}", state.hops, state.current);
                return state.finish(StopReason::Cancelled);
            }

            // Parse failure means no host: skip the early-exit and unwrap checks
            // and let the probe fail soft.
            let parsed = Url::parse(&state.current).ok();
            let host = parsed
                .as_ref()
                .and_then(|u| u.host_str())
                .map(str::to_ascii_lowercase);

            if let Some(host) = host.as_deref() {
                if self.config.is_terminal_host(host) {
                    debug!(
                        "Hit terminal domain '{}' at hop {}, stopping early",
                        host, state.hops
                    );
                    return state.finish(StopReason::TerminalDomain);
                }

                if self.config.is_app_link_host(host) {
                    debug!("Detected app link URL: {}", state.current);
                    if let Some(target) = parsed.as_ref().and_then(unwrap_app_link) {
                        state.advance(target);
                        continue;
                    }
                }
            }

            if let Some(url) = &parsed {
                if !matches!(url.scheme(), "http" | "https") {
                    debug!("Not probing non-HTTP URL: {}", state.current);
                    return state.finish(StopReason::NonHttpScheme);
                }
            }

            let probed = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                outcome = probe_redirect(self.transport.as_ref(), &state.current) => Some(outcome),
            };
            let Some(outcome) = probed else {
                debug!("Cancelled during probe of {}", state.current);
                return state.finish(StopReason::Cancelled);
            };

            match outcome {
                RedirectOutcome::RedirectTo(next) if next != state.current => {
                    debug!("Hop {}: redirected to {}", state.hops, next);
                    state.advance(next);
                }
                RedirectOutcome::ErrorUseOriginal(e) => {
                    warn!("Network error resolving redirect: {}", e);
                    let mut resolution = state.finish(StopReason::ProbeFailed);
                    resolution.probe_failure = Some(e.kind);
                    return resolution;
                }
                // RetryWithGet is consumed by probe_redirect.
                RedirectOutcome::RedirectTo(_)
                | RedirectOutcome::NoRedirect
                | RedirectOutcome::RetryWithGet => {
                    debug!(
                        "No more redirects at hop {}, final URL: {}",
                        state.hops, state.current
                    );
                    return state.finish(StopReason::NoRedirect);
                }
            }
        }

        debug!(
            "Reached max hops ({}), final URL: {}",
            state.hops, state.current
        );
        state.finish(StopReason::HopLimit)
    }
}

/// Resolves many independent URLs concurrently, preserving input order.
///
/// At most `concurrency` resolutions are in flight at once; all of them share
/// the resolver's transport. Cancelling `cancel` makes every outstanding
/// resolution return its current URL.
pub async fn resolve_all<T: Transport + ?Sized>(
    resolver: &RedirectResolver<T>,
    urls: Vec<String>,
    concurrency: usize,
    cancel: &CancellationToken,
) -> Vec<Resolution> {
    stream::iter(urls)
        .map(move |url| async move { resolver.resolve_with_cancel(&url, cancel).await })
        .buffered(concurrency.max(1))
        .collect()
        .await
}
