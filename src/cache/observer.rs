// src/cache/observer.rs

//! Diagnostics hook for cache updates.
//!
//! Observers see every update the cache processes. They have no influence
//! on the snapshot that `update` returns.

use tracing::{debug, warn};

use crate::cache::result::ComputationResult;
use crate::path::GlobalPath;

/// Whether an update made it into the new snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Applied,
    /// Dropped by [`UpdatePolicy::KeepTerminal`](crate::types::UpdatePolicy).
    Ignored,
}

/// One processed `(path, result)` pair.
#[derive(Debug)]
pub struct CacheUpdate<'a, T, E> {
    /// Version of the snapshot being produced.
    pub version: u64,
    pub path: &'a GlobalPath,
    pub previous: Option<&'a ComputationResult<T, E>>,
    pub result: &'a ComputationResult<T, E>,
    pub outcome: UpdateOutcome,
}

pub trait UpdateObserver<T, E> {
    fn observe(&mut self, update: &CacheUpdate<'_, T, E>);
}

/// Default observer: one structured tracing event per update.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl<T, E> UpdateObserver<T, E> for TracingObserver {
    fn observe(&mut self, update: &CacheUpdate<'_, T, E>) {
        let previous = update.previous.map(|p| p.state_name()).unwrap_or("absent");
        match update.outcome {
            UpdateOutcome::Applied => debug!(
                version = update.version,
                path = %update.path,
                previous,
                state = update.result.state_name(),
                "result cache updated"
            ),
            UpdateOutcome::Ignored => warn!(
                version = update.version,
                path = %update.path,
                previous,
                state = update.result.state_name(),
                "ignoring update that would regress a terminal result"
            ),
        }
    }
}

/// Observer that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl<T, E> UpdateObserver<T, E> for NoopObserver {
    fn observe(&mut self, _update: &CacheUpdate<'_, T, E>) {}
}
