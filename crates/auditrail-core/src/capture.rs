//! Change capture around mutation operations
//!
//! [`ChangeCapture`] wraps any operation `Fn(&A) -> Result<T, E>` and, on
//! success, writes the field-level diff of the affected record to a
//! [`ChangeSink`]. The call site supplies the collaborators when composing:
//!
//! - a record resolver `(args, Option<&result>) -> Result<R, ExError>`, called
//!   once before the operation (no result yet) and once after it;
//! - an actor accessor `(args) -> Option<String>`, defaulting to `"system"`;
//! - a comment accessor `(args) -> Option<String>`.
//!
//! The audit path is best-effort. Whatever happens inside it, the caller
//! receives exactly the `Ok`/`Err` the operation produced:
//!
//! - before-resolution failure: treated as creation (no prior state);
//! - operation error: returned unchanged, nothing is captured;
//! - after-resolution failure: capture skipped, logged at `warn`;
//! - sink failure: logged at `warn`, reported to the monitor.
//!
//! The audit write is not atomic with the mutation: a crash between the two
//! leaves an unaudited change.

use crate::diff::{diff, ChangeContext};
use crate::errors::ExError;
use crate::monitor::{CaptureMonitor, CaptureStage, NoopMonitor};
use crate::record::Record;
use crate::sink::ChangeSink;
use crate::snapshot::Snapshot;
use crate::types::schema::{EVENT_CAPTURE_PERSISTED, EVENT_CAPTURE_SKIPPED};
use crate::types::Actor;
use chrono::{DateTime, Utc};

type ResolveRecord<'a, A, T, R> = Box<dyn Fn(&A, Option<&T>) -> Result<R, ExError> + 'a>;
type ResolveText<'a, A> = Box<dyn Fn(&A) -> Option<String> + 'a>;

static NOOP_MONITOR: NoopMonitor = NoopMonitor;

/// Change capture configuration for one kind of mutation
///
/// `A` is the operation's argument type, `T` its success type and `R` the
/// tracked record it mutates.
pub struct ChangeCapture<'a, A, T, R> {
    resolve_record: ResolveRecord<'a, A, T, R>,
    resolve_actor: ResolveText<'a, A>,
    resolve_comment: ResolveText<'a, A>,
    sink: &'a dyn ChangeSink,
    monitor: &'a dyn CaptureMonitor,
    clock: fn() -> DateTime<Utc>,
}

impl<'a, A, T, R: Record> ChangeCapture<'a, A, T, R> {
    /// Compose a capture with a record resolver and a sink
    ///
    /// Actor and comment resolve to `"system"` and none until set.
    pub fn new<F>(resolve_record: F, sink: &'a dyn ChangeSink) -> Self
    where
        F: Fn(&A, Option<&T>) -> Result<R, ExError> + 'a,
    {
        Self {
            resolve_record: Box::new(resolve_record),
            resolve_actor: Box::new(|_| None),
            resolve_comment: Box::new(|_| None),
            sink,
            monitor: &NOOP_MONITOR,
            clock: Utc::now,
        }
    }

    /// Set the actor accessor
    pub fn with_actor<F>(mut self, resolve_actor: F) -> Self
    where
        F: Fn(&A) -> Option<String> + 'a,
    {
        self.resolve_actor = Box::new(resolve_actor);
        self
    }

    /// Set the comment accessor
    pub fn with_comment<F>(mut self, resolve_comment: F) -> Self
    where
        F: Fn(&A) -> Option<String> + 'a,
    {
        self.resolve_comment = Box::new(resolve_comment);
        self
    }

    pub fn with_monitor(mut self, monitor: &'a dyn CaptureMonitor) -> Self {
        self.monitor = monitor;
        self
    }

    /// Override the source of `changed_at`
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Run `operation` once with change capture around it
    ///
    /// # Errors
    ///
    /// Returns the operation's own error, unchanged. Audit failures are never
    /// returned.
    pub fn call<E, F>(&self, args: &A, operation: F) -> Result<T, E>
    where
        F: FnOnce(&A) -> Result<T, E>,
    {
        let before = match (self.resolve_record)(args, None) {
            Ok(record) => Some(Snapshot::capture(&record)),
            Err(err) => {
                tracing::debug!(
                    event = EVENT_CAPTURE_SKIPPED,
                    stage = CaptureStage::ResolveBefore.as_str(),
                    entity_type = R::ENTITY_TYPE,
                    err.code = err.code(),
                    "No prior state; treating mutation as creation"
                );
                None
            }
        };

        let result = operation(args);

        if let Ok(value) = &result {
            self.record_changes(args, before, value);
        }

        result
    }

    /// Turn `operation` into a wrapped operation with the same signature
    pub fn wrap<E, F>(self, operation: F) -> impl Fn(&A) -> Result<T, E> + 'a
    where
        F: Fn(&A) -> Result<T, E> + 'a,
        A: 'a,
        T: 'a,
        E: 'a,
    {
        move |args: &A| self.call(args, &operation)
    }

    fn record_changes(&self, args: &A, before: Option<Snapshot>, result: &T) {
        let after = match (self.resolve_record)(args, Some(result)) {
            Ok(record) => Snapshot::capture(&record),
            Err(err) => {
                tracing::warn!(
                    event = EVENT_CAPTURE_SKIPPED,
                    stage = CaptureStage::ResolveAfter.as_str(),
                    entity_type = R::ENTITY_TYPE,
                    err.code = err.code(),
                    error = %err,
                    "Could not resolve record after mutation; change not captured"
                );
                self.monitor.on_failure(CaptureStage::ResolveAfter, &err);
                return;
            }
        };

        let ctx = ChangeContext::at(
            Actor::or_system((self.resolve_actor)(args).as_deref()),
            (self.clock)(),
            (self.resolve_comment)(args),
        );
        let change_set = diff(before.as_ref(), &after, &ctx);

        if change_set.is_empty() {
            tracing::debug!(
                entity_type = R::ENTITY_TYPE,
                entity_id = %after.entity_id(),
                "Mutation changed no tracked fields"
            );
            return;
        }

        match self.sink.persist(&change_set) {
            Ok(()) => {
                tracing::debug!(
                    event = EVENT_CAPTURE_PERSISTED,
                    entity_type = R::ENTITY_TYPE,
                    entity_id = %after.entity_id(),
                    changed_by = ctx.changed_by.as_str(),
                    change_count = change_set.len() as u64,
                    "Persisted change set"
                );
                self.monitor.on_persisted(&change_set);
            }
            Err(err) => {
                tracing::warn!(
                    event = EVENT_CAPTURE_SKIPPED,
                    stage = CaptureStage::Persist.as_str(),
                    entity_type = R::ENTITY_TYPE,
                    entity_id = %after.entity_id(),
                    change_count = change_set.len() as u64,
                    err.code = err.code(),
                    error = %err,
                    "Change sink rejected change set"
                );
                self.monitor.on_failure(CaptureStage::Persist, &err);
            }
        }
    }
}

/// Wrap `operation` with change capture in one call
///
/// Shorthand for `ChangeCapture::new(..).with_actor(..).with_comment(..).wrap(..)`.
pub fn capture_changes<'a, A, T, R, E, Res, Act, Com, Op>(
    resolve_record: Res,
    resolve_actor: Act,
    resolve_comment: Com,
    sink: &'a dyn ChangeSink,
    operation: Op,
) -> impl Fn(&A) -> Result<T, E> + 'a
where
    R: Record,
    A: 'a,
    T: 'a,
    E: 'a,
    Res: Fn(&A, Option<&T>) -> Result<R, ExError> + 'a,
    Act: Fn(&A) -> Option<String> + 'a,
    Com: Fn(&A) -> Option<String> + 'a,
    Op: Fn(&A) -> Result<T, E> + 'a,
{
    ChangeCapture::new(resolve_record, sink)
        .with_actor(resolve_actor)
        .with_comment(resolve_comment)
        .wrap(operation)
}
