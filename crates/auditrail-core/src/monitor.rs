//! Hooks for observing the best-effort audit path
//!
//! The capture wrapper never surfaces audit failures to its caller, so gaps
//! in the change log have to be watched from outside. A [`CaptureMonitor`]
//! receives every persisted change set and every swallowed failure.

use crate::diff::ChangeSet;
use crate::errors::ExError;
use std::sync::atomic::{AtomicU64, Ordering};

/// Step of the capture path at which something was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStage {
    /// Resolving the record before the operation (absent on creation)
    ResolveBefore,
    /// Resolving the record after the operation
    ResolveAfter,
    /// Handing the change set to the sink
    Persist,
}

impl CaptureStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureStage::ResolveBefore => "resolve_before",
            CaptureStage::ResolveAfter => "resolve_after",
            CaptureStage::Persist => "persist",
        }
    }
}

/// Observer of the capture path
///
/// `ResolveBefore` failures are the normal creation path and are not
/// reported here.
pub trait CaptureMonitor {
    fn on_persisted(&self, _change_set: &ChangeSet) {}

    fn on_failure(&self, _stage: CaptureStage, _err: &ExError) {}
}

/// Monitor that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMonitor;

impl CaptureMonitor for NoopMonitor {}

/// Monitor that counts outcomes
#[derive(Debug, Default)]
pub struct CaptureCounters {
    change_sets: AtomicU64,
    records: AtomicU64,
    resolve_failures: AtomicU64,
    persist_failures: AtomicU64,
}

impl CaptureCounters {
    /// Zeroed counters; usable in a `static`
    pub const fn new() -> Self {
        Self {
            change_sets: AtomicU64::new(0),
            records: AtomicU64::new(0),
            resolve_failures: AtomicU64::new(0),
            persist_failures: AtomicU64::new(0),
        }
    }

    /// Change sets handed to the sink successfully
    pub fn change_sets(&self) -> u64 {
        self.change_sets.load(Ordering::Relaxed)
    }

    /// Change records contained in those change sets
    pub fn records(&self) -> u64 {
        self.records.load(Ordering::Relaxed)
    }

    /// Mutations whose "after" record could not be resolved
    pub fn resolve_failures(&self) -> u64 {
        self.resolve_failures.load(Ordering::Relaxed)
    }

    /// Change sets the sink rejected
    pub fn persist_failures(&self) -> u64 {
        self.persist_failures.load(Ordering::Relaxed)
    }
}

impl CaptureMonitor for CaptureCounters {
    fn on_persisted(&self, change_set: &ChangeSet) {
        self.change_sets.fetch_add(1, Ordering::Relaxed);
        self.records.fetch_add(change_set.len() as u64, Ordering::Relaxed);
    }

    fn on_failure(&self, stage: CaptureStage, _err: &ExError) {
        match stage {
            CaptureStage::ResolveBefore => {}
            CaptureStage::ResolveAfter => {
                self.resolve_failures.fetch_add(1, Ordering::Relaxed);
            }
            CaptureStage::Persist => {
                self.persist_failures.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;

    #[test]
    fn test_counters_track_failures_by_stage() {
        let counters = CaptureCounters::new();
        let err = ExError::new(ExErrorKind::Persistence);

        counters.on_failure(CaptureStage::Persist, &err);
        counters.on_failure(CaptureStage::ResolveAfter, &err);
        counters.on_failure(CaptureStage::ResolveAfter, &err);

        assert_eq!(counters.persist_failures(), 1);
        assert_eq!(counters.resolve_failures(), 2);
        assert_eq!(counters.change_sets(), 0);
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(CaptureStage::ResolveAfter.as_str(), "resolve_after");
        assert_eq!(CaptureStage::Persist.as_str(), "persist");
    }
}
