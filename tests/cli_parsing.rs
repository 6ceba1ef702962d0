//! Tests for CLI option parsing.

use clap::Parser;
use link_resolver::config::{
    LogFormat, LogLevel, Opt, OutputFormat, CONNECT_TIMEOUT_MS, DEFAULT_APP_LINK_HOST,
    DEFAULT_CONCURRENCY, MAX_REDIRECT_HOPS,
};
use link_resolver::ConfigError;

#[test]
fn test_defaults() {
    let opt = Opt::try_parse_from(["link_resolver"]).expect("no arguments is valid");

    assert!(opt.urls.is_empty());
    assert!(matches!(opt.log_level, LogLevel::Warn));
    assert!(matches!(opt.log_format, LogFormat::Plain));
    assert_eq!(opt.output, OutputFormat::Plain);
    assert_eq!(opt.max_hops, MAX_REDIRECT_HOPS);
    assert_eq!(opt.connect_timeout_ms, CONNECT_TIMEOUT_MS);
    assert_eq!(opt.app_link_host, DEFAULT_APP_LINK_HOST);
    assert_eq!(opt.concurrency, DEFAULT_CONCURRENCY);
    assert!(opt.terminal_domains.is_empty());
}

#[test]
fn test_multiple_urls() {
    let opt = Opt::try_parse_from([
        "link_resolver",
        "https://a.example/",
        "https://reddit.app.link/x?$original_url=https%3A%2F%2Fredd.it%2Fa",
    ])
    .expect("valid arguments");

    assert_eq!(opt.urls.len(), 2);
    assert_eq!(
        opt.urls[1],
        "https://reddit.app.link/x?$original_url=https%3A%2F%2Fredd.it%2Fa"
    );
}

#[test]
fn test_all_options() {
    let opt = Opt::try_parse_from([
        "link_resolver",
        "--log-level",
        "debug",
        "--log-format",
        "json",
        "--output",
        "json",
        "--max-hops",
        "3",
        "--connect-timeout-ms",
        "1000",
        "--read-timeout-ms",
        "2000",
        "--write-timeout-ms",
        "3000",
        "--terminal-domain",
        "example.org",
        "--app-link-host",
        "App.Example",
        "--user-agent",
        "test-agent/1.0",
        "--concurrency",
        "4",
        "https://a.example/",
    ])
    .expect("valid arguments");

    assert!(matches!(opt.log_level, LogLevel::Debug));
    assert!(matches!(opt.log_format, LogFormat::Json));
    assert_eq!(opt.output, OutputFormat::Json);

    let config = opt.resolver_config().expect("valid config");
    assert_eq!(config.max_hops, 3);
    assert_eq!(config.connect_timeout_ms, 1000);
    assert_eq!(config.read_timeout_ms, 2000);
    assert_eq!(config.write_timeout_ms, 3000);
    assert!(config.is_terminal_host("example.org"));
    assert!(!config.is_terminal_host("reddit.com"));
    assert_eq!(config.app_link_host, "app.example");
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_invalid_log_level_rejected() {
    assert!(Opt::try_parse_from(["link_resolver", "--log-level", "loud"]).is_err());
}

#[test]
fn test_non_numeric_hops_rejected() {
    assert!(Opt::try_parse_from(["link_resolver", "--max-hops", "many"]).is_err());
}

#[test]
fn test_zero_hops_rejected_by_config() {
    let opt = Opt::try_parse_from(["link_resolver", "--max-hops", "0"]).expect("parses");
    assert_eq!(opt.resolver_config().unwrap_err(), ConfigError::InvalidHopLimit(0));
}

#[test]
fn test_zero_timeout_rejected_by_config() {
    let opt =
        Opt::try_parse_from(["link_resolver", "--write-timeout-ms", "0"]).expect("parses");
    assert_eq!(
        opt.resolver_config().unwrap_err(),
        ConfigError::InvalidTimeout("write")
    );
}
