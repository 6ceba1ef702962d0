//! Error type definitions.
//!
//! None of these escape `resolve`: probe and decode failures are absorbed by the
//! resolver and only show up in logs. Initialization and configuration errors are
//! reported at startup, before any resolution runs.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// The resolver configuration was rejected.
    #[error("Invalid configuration: {0}")]
    ConfigError(#[from] ConfigError),
}

/// Error types for invalid resolver configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_hops` was zero.
    #[error("hop limit must be at least 1 (got {0})")]
    InvalidHopLimit(usize),

    /// A timeout (named by the field) was zero.
    #[error("{0} timeout must be greater than zero")]
    InvalidTimeout(&'static str),

    /// Batch concurrency was zero.
    #[error("concurrency must be at least 1 (got {0})")]
    InvalidConcurrency(usize),
}

/// Failure to percent-decode an app-link `original_url` value.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// A `%` was not followed by two hex digits.
    #[error("malformed percent escape at byte {0}")]
    MalformedEscape(usize),

    /// The decoded bytes are not valid UTF-8.
    #[error("decoded value is not valid UTF-8")]
    InvalidUtf8,

    /// The parameter was present but decoded to nothing.
    #[error("decoded value is empty")]
    Empty,
}

/// Categories of transport-level probe failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeFailureKind {
    /// The request could not be built (usually an unparseable URL).
    Builder,
    /// A connect, read or total deadline elapsed.
    Timeout,
    /// The TCP or TLS connection could not be established.
    Connect,
    /// Failure while sending the request or reading the response head.
    Request,
    /// Any other transport failure.
    Other,
}

impl ProbeFailureKind {
    /// Human-readable name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeFailureKind::Builder => "request builder error",
            ProbeFailureKind::Timeout => "timeout",
            ProbeFailureKind::Connect => "connect error",
            ProbeFailureKind::Request => "request error",
            ProbeFailureKind::Other => "transport error",
        }
    }
}

impl std::fmt::Display for ProbeFailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A probe that produced no HTTP response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} probing {url}: {message}")]
pub struct ProbeError {
    /// Failure category.
    pub kind: ProbeFailureKind,
    /// URL that was being probed.
    pub url: String,
    /// Underlying transport error text.
    pub message: String,
}

impl ProbeError {
    /// Creates a probe error.
    pub fn new(kind: ProbeFailureKind, url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_probe_failure_kind_strings_are_distinct() {
        let names: std::collections::HashSet<_> =
            ProbeFailureKind::iter().map(|k| k.as_str()).collect();
        assert_eq!(names.len(), ProbeFailureKind::iter().count());
    }

    #[test]
    fn test_probe_error_display() {
        let err = ProbeError::new(
            ProbeFailureKind::Timeout,
            "https://example.com/",
            "operation timed out",
        );
        assert_eq!(
            err.to_string(),
            "timeout probing https://example.com/: operation timed out"
        );
    }

    #[test]
    fn test_config_error_wraps_into_initialization_error() {
        let err: InitializationError = ConfigError::InvalidHopLimit(0).into();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: hop limit must be at least 1 (got 0)"
        );
    }
}
