//! Resolver configuration and constants.
//!
//! This module provides:
//! - Configuration constants (terminal domains, hop limit, timeouts)
//! - The immutable `ResolverConfig` shared by every resolution
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{LogFormat, LogLevel, Opt, OutputFormat, ResolverConfig};
