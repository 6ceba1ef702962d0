//! Resolution statistics tracking.
//!
//! Thread-safe counters for how resolutions ended and which transport failures
//! were absorbed along the way.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::ProbeFailureKind;
use crate::resolve::{Resolution, StopReason};

/// Thread-safe resolution statistics tracker.
///
/// Every `StopReason` and `ProbeFailureKind` is initialized to zero on creation,
/// so counters can be shared across tasks behind an `Arc` without locking.
pub struct ResolutionStats {
    stop_reasons: HashMap<StopReason, AtomicUsize>,
    probe_failures: HashMap<ProbeFailureKind, AtomicUsize>,
    hops: AtomicUsize,
}

impl ResolutionStats {
    /// Creates a tracker with every counter at zero.
    pub fn new() -> Self {
        let mut stop_reasons = HashMap::new();
        for reason in StopReason::iter() {
            stop_reasons.insert(reason, AtomicUsize::new(0));
        }

        let mut probe_failures = HashMap::new();
        for kind in ProbeFailureKind::iter() {
            probe_failures.insert(kind, AtomicUsize::new(0));
        }

        ResolutionStats {
            stop_reasons,
            probe_failures,
            hops: AtomicUsize::new(0),
        }
    }

    /// Records a finished resolution.
    pub fn record(&self, resolution: &Resolution) {
        if let Some(counter) = self.stop_reasons.get(&resolution.stop_reason) {
            counter.fetch_add(1, Ordering::Relaxed);
        }
        if let Some(kind) = resolution.probe_failure {
            self.increment_probe_failure(kind);
        }
        self.hops.fetch_add(resolution.hops, Ordering::Relaxed);
    }

    /// Counts one absorbed probe failure of `kind`.
    pub fn increment_probe_failure(&self, kind: ProbeFailureKind) {
        if let Some(counter) = self.probe_failures.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Number of resolutions that stopped for `reason`.
    pub fn get_stop_count(&self, reason: StopReason) -> usize {
        self.stop_reasons
            .get(&reason)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Number of absorbed probe failures of `kind`.
    pub fn get_probe_failure_count(&self, kind: ProbeFailureKind) -> usize {
        self.probe_failures
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total number of resolutions recorded.
    pub fn total(&self) -> usize {
        self.stop_reasons
            .values()
            .map(|c| c.load(Ordering::SeqCst))
            .sum()
    }

    /// Total hops taken across all recorded resolutions.
    pub fn total_hops(&self) -> usize {
        self.hops.load(Ordering::SeqCst)
    }

    /// Logs a one-line-per-reason summary at info level.
    pub fn log_summary(&self) {
        log::info!(
            "Resolved {} URL(s) in {} hop(s)",
            self.total(),
            self.total_hops()
        );
        for reason in StopReason::iter() {
            let count = self.get_stop_count(reason);
            if count > 0 {
                log::info!("  {}: {}", reason, count);
            }
        }
        for kind in ProbeFailureKind::iter() {
            let count = self.get_probe_failure_count(kind);
            if count > 0 {
                log::info!("  probe {}: {}", kind, count);
            }
        }
    }
}

impl Default for ResolutionStats {
    fn default() -> Self {
        Self::new()
    }
}
