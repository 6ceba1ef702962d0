//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and resolver configuration.

use std::collections::HashSet;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    CONNECT_TIMEOUT_MS, DEFAULT_APP_LINK_HOST, DEFAULT_CONCURRENCY, DEFAULT_TERMINAL_DOMAINS,
    DEFAULT_USER_AGENT, MAX_REDIRECT_HOPS, READ_TIMEOUT_MS, WRITE_TIMEOUT_MS,
};
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How resolved URLs are written to stdout.
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One resolved URL per line
    Plain,
    /// One JSON object per line with the hop chain and stop reason
    Json,
}

/// Resolver configuration (no CLI dependencies).
///
/// Built once and shared read-only by every resolution. Timeouts apply uniformly
/// to each probe; there is no per-hop override.
///
/// # Examples
///
/// ```
/// use link_resolver::ResolverConfig;
///
/// let config = ResolverConfig {
///     max_hops: 4,
///     ..Default::default()
/// };
/// assert!(config.is_terminal_host("WWW.Reddit.com"));
/// ```
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Maximum number of hops (probe redirects plus app-link unwraps)
    pub max_hops: usize,

    /// TCP connect timeout in milliseconds
    pub connect_timeout_ms: u64,

    /// Read timeout in milliseconds
    pub read_timeout_ms: u64,

    /// Write timeout in milliseconds
    pub write_timeout_ms: u64,

    /// Lowercase hostnames that end resolution without a probe
    pub terminal_domains: HashSet<String>,

    /// Host of the deep-link wrapper whose `original_url` parameter is unwrapped
    pub app_link_host: String,

    /// HTTP User-Agent header value
    pub user_agent: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_hops: MAX_REDIRECT_HOPS,
            connect_timeout_ms: CONNECT_TIMEOUT_MS,
            read_timeout_ms: READ_TIMEOUT_MS,
            write_timeout_ms: WRITE_TIMEOUT_MS,
            terminal_domains: DEFAULT_TERMINAL_DOMAINS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            app_link_host: DEFAULT_APP_LINK_HOST.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ResolverConfig {
    /// Replaces the terminal-domain set, normalizing every entry to lowercase.
    pub fn with_terminal_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.terminal_domains = domains
            .into_iter()
            .map(|d| d.as_ref().trim().to_ascii_lowercase())
            .filter(|d| !d.is_empty())
            .collect();
        self
    }

    /// Checks the configuration for values the resolver cannot run with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidHopLimit` if `max_hops` is zero and
    /// `ConfigError::InvalidTimeout` if any timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_hops == 0 {
            return Err(ConfigError::InvalidHopLimit(self.max_hops));
        }
        for (name, value) in [
            ("connect", self.connect_timeout_ms),
            ("read", self.read_timeout_ms),
            ("write", self.write_timeout_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidTimeout(name));
            }
        }
        Ok(())
    }

    /// Returns true if `host` is in the terminal-domain set (case-insensitive).
    pub fn is_terminal_host(&self, host: &str) -> bool {
        self.terminal_domains.contains(&host.to_ascii_lowercase())
    }

    /// Returns true if `host` is the configured app-link wrapper host (case-insensitive).
    pub fn is_app_link_host(&self, host: &str) -> bool {
        host.eq_ignore_ascii_case(&self.app_link_host)
    }

    /// TCP/TLS connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Timeout for reading the response head.
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Upper bound for one whole probe: connect, send, then read.
    ///
    /// reqwest has no separate write timeout, so the write budget is folded
    /// into the total request deadline.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(
            self.connect_timeout_ms
                .saturating_add(self.read_timeout_ms)
                .saturating_add(self.write_timeout_ms),
        )
    }
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Resolve a single tracking link
/// link_resolver 'https://click.redditmail.com/CL0/https:%2F%2Fwww.reddit.com%2Fr%2Frust'
///
/// # Resolve a list from stdin, emitting JSON with the hop chain
/// link_resolver --output json < links.txt
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "link_resolver",
    about = "Follows HTTP redirects and deep-link wrappers to a final destination URL."
)]
pub struct Opt {
    /// URLs to resolve (reads one per line from stdin when omitted)
    pub urls: Vec<String>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Output format: plain|json
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub output: OutputFormat,

    /// Maximum number of hops to follow per URL
    #[arg(long, default_value_t = MAX_REDIRECT_HOPS)]
    pub max_hops: usize,

    /// TCP connect timeout in milliseconds
    #[arg(long, default_value_t = CONNECT_TIMEOUT_MS)]
    pub connect_timeout_ms: u64,

    /// Read timeout in milliseconds
    #[arg(long, default_value_t = READ_TIMEOUT_MS)]
    pub read_timeout_ms: u64,

    /// Write timeout in milliseconds
    #[arg(long, default_value_t = WRITE_TIMEOUT_MS)]
    pub write_timeout_ms: u64,

    /// Terminal domain (repeatable). Replaces the built-in set when given.
    #[arg(long = "terminal-domain")]
    pub terminal_domains: Vec<String>,

    /// Host of the deep-link wrapper to unwrap
    #[arg(long, default_value = DEFAULT_APP_LINK_HOST)]
    pub app_link_host: String,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Maximum number of URLs resolved concurrently
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,
}

impl Opt {
    /// Builds and validates the resolver configuration described by these options.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the hop limit, a timeout, or the concurrency is zero.
    pub fn resolver_config(&self) -> Result<ResolverConfig, ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency(self.concurrency));
        }

        let mut config = ResolverConfig {
            max_hops: self.max_hops,
            connect_timeout_ms: self.connect_timeout_ms,
            read_timeout_ms: self.read_timeout_ms,
            write_timeout_ms: self.write_timeout_ms,
            app_link_host: self.app_link_host.to_ascii_lowercase(),
            user_agent: self.user_agent.clone(),
            ..Default::default()
        };
        if !self.terminal_domains.is_empty() {
            config = config.with_terminal_domains(&self.terminal_domains);
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = ResolverConfig::default();
        assert_eq!(config.max_hops, 8);
        assert_eq!(config.connect_timeout_ms, 5000);
        assert_eq!(config.read_timeout_ms, 5000);
        assert_eq!(config.write_timeout_ms, 5000);
        assert_eq!(config.terminal_domains.len(), 8);
        assert_eq!(config.app_link_host, "reddit.app.link");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_terminal_host_is_case_insensitive() {
        let config = ResolverConfig::default();
        assert!(config.is_terminal_host("www.reddit.com"));
        assert!(config.is_terminal_host("WWW.REDDIT.COM"));
        assert!(!config.is_terminal_host("reddit.app.link"));
        assert!(!config.is_terminal_host("sub.reddit.com"));
    }

    #[test]
    fn test_with_terminal_domains_normalizes() {
        let config =
            ResolverConfig::default().with_terminal_domains(["Example.COM ", "", "b.example"]);
        assert_eq!(config.terminal_domains.len(), 2);
        assert!(config.terminal_domains.contains("example.com"));
        assert!(config.is_terminal_host("B.Example"));
    }

    #[test]
    fn test_validate_rejects_zero_hops() {
        let config = ResolverConfig {
            max_hops: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidHopLimit(0))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = ResolverConfig {
            read_timeout_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTimeout("read"))
        ));
    }

    #[test]
    fn test_request_timeout_sums_budgets() {
        let config = ResolverConfig {
            connect_timeout_ms: 100,
            read_timeout_ms: 200,
            write_timeout_ms: 300,
            ..Default::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_millis(600));
        assert_eq!(config.connect_timeout(), Duration::from_millis(100));
        assert_eq!(config.read_timeout(), Duration::from_millis(200));
    }

    #[test]
    fn test_app_link_host_match() {
        let config = ResolverConfig::default();
        assert!(config.is_app_link_host("Reddit.App.Link"));
        assert!(!config.is_app_link_host("app.link"));
    }

    #[test]
    fn test_opt_defaults_build_config() {
        let opt = Opt::parse_from(["link_resolver", "https://example.com"]);
        assert_eq!(opt.urls, vec!["https://example.com".to_string()]);
        let config = opt.resolver_config().expect("defaults should be valid");
        assert_eq!(config.max_hops, MAX_REDIRECT_HOPS);
        assert!(config.is_terminal_host("redd.it"));
    }

    #[test]
    fn test_opt_terminal_domains_replace_defaults() {
        let opt = Opt::parse_from([
            "link_resolver",
            "--terminal-domain",
            "Example.org",
            "--terminal-domain",
            "example.net",
        ]);
        let config = opt.resolver_config().expect("config should be valid");
        assert!(config.is_terminal_host("example.org"));
        assert!(config.is_terminal_host("example.net"));
        assert!(!config.is_terminal_host("reddit.com"));
    }

    #[test]
    fn test_opt_rejects_zero_concurrency() {
        let opt = Opt::parse_from(["link_resolver", "--concurrency", "0"]);
        assert!(matches!(
            opt.resolver_config(),
            Err(ConfigError::InvalidConcurrency(0))
        ));
    }
}
