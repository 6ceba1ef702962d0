//! link_resolver library: redirect chain resolution
//!
//! Follows a URL through HTTP redirects and app-link wrappers until it reaches a
//! terminal domain, a non-redirect response, or the hop limit, and returns the
//! best-known destination. Resolution never fails outward: network errors,
//! malformed URLs and undecodable wrapper parameters all degrade to "return the
//! latest URL reached".
//!
//! # Example
//!
//! ```no_run
//! use link_resolver::{RedirectResolver, ResolverConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = RedirectResolver::from_config(ResolverConfig::default())?;
//! let resolution = resolver
//!     .resolve_traced("https://reddit.app.link/x?$original_url=https%3A%2F%2Fredd.it%2Fabc")
//!     .await;
//! println!("{} ({} hops, {})", resolution.final_url, resolution.hops, resolution.stop_reason);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Each probe may wait up to the
//! configured timeouts, so keep resolution off latency-sensitive tasks.

#![warn(missing_docs)]

pub mod config;
pub mod error_handling;
pub mod initialization;
pub mod resolve;

// Re-export public API
pub use config::{LogFormat, LogLevel, OutputFormat, ResolverConfig};
pub use error_handling::{ConfigError, InitializationError, ResolutionStats};
pub use resolve::{
    resolve_all, RedirectResolver, ReqwestTransport, Resolution, StopReason, Transport,
};
pub use run::{read_urls, run_resolve, ResolveReport};

// Batch entry point used by the CLI
mod run {
    use std::io::BufRead;
    use std::time::Instant;

    use anyhow::{Context, Result};
    use log::{info, warn};
    use tokio_util::sync::CancellationToken;

    use crate::error_handling::ResolutionStats;
    use crate::resolve::{resolve_all, RedirectResolver, Resolution};
    use crate::ResolverConfig;

    /// Results of a batch resolution run.
    pub struct ResolveReport {
        /// One resolution per input URL, in input order
        pub resolutions: Vec<Resolution>,
        /// Counters by stop reason and absorbed probe failure
        pub stats: ResolutionStats,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Resolves every URL in `urls` with at most `concurrency` in flight.
    ///
    /// Ctrl-C cancels outstanding resolutions; each then reports the URL it had
    /// reached, so the report always has one entry per input.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created. Individual resolutions never fail.
    pub async fn run_resolve(
        config: ResolverConfig,
        urls: Vec<String>,
        concurrency: usize,
    ) -> Result<ResolveReport> {
        let start = Instant::now();
        let resolver =
            RedirectResolver::from_config(config).context("Failed to initialize resolver")?;

        let cancel = CancellationToken::new();
        let signal_task = tokio::spawn({
            let cancel = cancel.clone();
            async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    warn!("Interrupted, returning URLs resolved so far");
                    cancel.cancel();
                }
            }
        });

        info!("Resolving {} URL(s), concurrency {}", urls.len(), concurrency);
        let resolutions = resolve_all(&resolver, urls, concurrency, &cancel).await;
        signal_task.abort();

        let stats = ResolutionStats::new();
        for resolution in &resolutions {
            stats.record(resolution);
        }
        stats.log_summary();

        Ok(ResolveReport {
            resolutions,
            stats,
            elapsed_seconds: start.elapsed().as_secs_f64(),
        })
    }

    /// Reads one URL per line, skipping blank lines and `#` comments.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from `reader` fails.
    pub fn read_urls<R: BufRead>(reader: R) -> Result<Vec<String>> {
        let mut urls = Vec::new();
        for line in reader.lines() {
            let line = line.context("Failed to read URL list")?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            urls.push(trimmed.to_string());
        }
        Ok(urls)
    }

}
