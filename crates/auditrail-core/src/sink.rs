//! Destinations for change sets

use crate::diff::ChangeSet;
use crate::errors::{ExError, ExErrorKind};
use std::sync::Mutex;

/// Batch-persists change sets
///
/// A sink must write a change set entirely or not at all. Failures are
/// reported as `ExErrorKind::Persistence`; the capture wrapper logs them and
/// carries on.
pub trait ChangeSink {
    /// Persist every record of `change_set` as one batch
    ///
    /// # Errors
    ///
    /// Returns a `Persistence` error if the store rejects the batch.
    fn persist(&self, change_set: &ChangeSet) -> Result<(), ExError>;
}

impl<S: ChangeSink + ?Sized> ChangeSink for &S {
    fn persist(&self, change_set: &ChangeSet) -> Result<(), ExError> {
        (**self).persist(change_set)
    }
}

impl<S: ChangeSink + ?Sized> ChangeSink for Box<S> {
    fn persist(&self, change_set: &ChangeSet) -> Result<(), ExError> {
        (**self).persist(change_set)
    }
}

/// Sink that keeps change sets in memory
///
/// Useful for tests and for callers that forward change sets elsewhere.
#[derive(Debug, Default)]
pub struct MemorySink {
    batches: Mutex<Vec<ChangeSet>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All persisted change sets, oldest first
    pub fn batches(&self) -> Vec<ChangeSet> {
        self.batches.lock().map(|b| b.clone()).unwrap_or_default()
    }

    /// Number of persist calls that succeeded
    pub fn batch_count(&self) -> usize {
        self.batches.lock().map(|b| b.len()).unwrap_or(0)
    }

    /// The most recent change set
    pub fn last(&self) -> Option<ChangeSet> {
        self.batches.lock().ok().and_then(|b| b.last().cloned())
    }
}

impl ChangeSink for MemorySink {
    fn persist(&self, change_set: &ChangeSet) -> Result<(), ExError> {
        let mut batches = self.batches.lock().map_err(|_| {
            ExError::new(ExErrorKind::Persistence)
                .with_op("memory_sink_persist")
                .with_message("change set buffer lock poisoned")
        })?;
        batches.push(change_set.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{diff, ChangeContext};
    use crate::snapshot::Snapshot;
    use auditrail_core_types::{Actor, EntityId};

    fn change_set() -> ChangeSet {
        let snap = Snapshot::from_values(
            "Probe",
            EntityId::from_string("p1".to_string()),
            vec![("name", "x".into())],
        );
        diff(None, &snap, &ChangeContext::now(Actor::system(), None))
    }

    #[test]
    fn test_memory_sink_keeps_batches_in_order() {
        let sink = MemorySink::new();
        sink.persist(&change_set()).unwrap();
        sink.persist(&change_set()).unwrap();

        assert_eq!(sink.batch_count(), 2);
        assert_eq!(sink.last().unwrap().len(), 1);
    }

    #[test]
    fn test_sink_through_reference_and_box() {
        let sink = MemorySink::new();
        let by_ref: &dyn ChangeSink = &sink;
        by_ref.persist(&change_set()).unwrap();

        let boxed: Box<dyn ChangeSink> = Box::new(MemorySink::new());
        boxed.persist(&change_set()).unwrap();

        assert_eq!(sink.batch_count(), 1);
    }
}
