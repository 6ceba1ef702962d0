//! Configuration constants.
//!
//! This module defines the defaults used when building a [`ResolverConfig`](super::ResolverConfig):
//! hop limit, network timeouts, and the hostnames that end or unwrap a chain.

/// Hostnames at which resolution stops early.
///
/// Once a redirect chain lands on one of these hosts the destination ecosystem has
/// been reached and no further probes are issued. Matching is exact and case-insensitive.
pub const DEFAULT_TERMINAL_DOMAINS: &[&str] = &[
    "reddit.com",
    "www.reddit.com",
    "old.reddit.com",
    "new.reddit.com",
    "redd.it",
    "v.redd.it",
    "i.redd.it",
    "redditmedia.com",
];

/// Deep-link redirector host whose URLs carry the real target in an
/// `$original_url` (or `original_url`) query parameter.
pub const DEFAULT_APP_LINK_HOST: &str = "reddit.app.link";

/// Query parameter prefixes checked on app-link URLs, in priority order.
pub const APP_LINK_PARAM_PREFIXES: &[&str] = &["$original_url=", "original_url="];

// Redirect handling
/// Maximum number of hops to follow
/// Prevents infinite redirect loops
pub const MAX_REDIRECT_HOPS: usize = 8;

/// HTTP status codes treated as redirects.
pub const REDIRECT_STATUS_CODES: &[u16] = &[301, 302, 303, 307, 308];

/// Status returned by servers that reject HEAD; triggers a GET retry.
pub const HTTP_STATUS_METHOD_NOT_ALLOWED: u16 = 405;

// Network operation timeouts
/// TCP connection timeout in milliseconds
pub const CONNECT_TIMEOUT_MS: u64 = 5000;
/// Read timeout in milliseconds
pub const READ_TIMEOUT_MS: u64 = 5000;
/// Write timeout in milliseconds
pub const WRITE_TIMEOUT_MS: u64 = 5000;

/// Default number of URLs resolved concurrently by the CLI.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Default User-Agent string for probe requests.
///
/// Some link trackers answer bare library user agents with a 403 instead of a
/// redirect, so a browser-like string is used. Override with `--user-agent`.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";
