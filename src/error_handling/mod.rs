//! Error handling and resolution statistics.
//!
//! This module provides:
//! - Error type definitions (initialization, configuration, probe, decode)
//! - Categorization of `reqwest` transport failures
//! - Resolution statistics tracking (stop reasons, absorbed probe failures)
//!
//! The resolver itself never returns these errors to its caller; they exist so
//! failures can be classified and logged before being absorbed.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, probe_error_from_reqwest};
pub use stats::ResolutionStats;
pub use types::{ConfigError, DecodeError, InitializationError, ProbeError, ProbeFailureKind};
