// src/cache/snapshot.rs

use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::observer::{CacheUpdate, TracingObserver, UpdateObserver, UpdateOutcome};
use crate::cache::result::ComputationResult;
use crate::path::GlobalPath;
use crate::types::UpdatePolicy;

/// Immutable, versioned snapshot of per-path results.
///
/// A new snapshot is derived with [`ResultCache::update`]; the receiver is
/// never modified, so any number of readers can hold on to an older
/// snapshot while a writer derives the next one. Cloning is cheap.
#[derive(Debug)]
pub struct ResultCache<T, E = String> {
    entries: Arc<HashMap<GlobalPath, ComputationResult<T, E>>>,
    version: u64,
}

impl<T, E> Clone for ResultCache<T, E> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            version: self.version,
        }
    }
}

impl<T, E> Default for ResultCache<T, E> {
    fn default() -> Self {
        Self {
            entries: Arc::new(HashMap::new()),
            version: 0,
        }
    }
}

impl<T, E> ResultCache<T, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `update` calls this snapshot descends from.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current state for `path`, or `None` if it was never reported.
    pub fn status(&self, path: &GlobalPath) -> Option<&ComputationResult<T, E>> {
        self.entries.get(path)
    }

    /// The materialized value, only when `path` is `Done`.
    pub fn final_result(&self, path: &GlobalPath) -> Option<&T> {
        self.status(path).and_then(ComputationResult::value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GlobalPath, &ComputationResult<T, E>)> {
        self.entries.iter()
    }
}

impl<T: Clone, E: Clone> ResultCache<T, E> {
    /// Apply `batch` in order and return the resulting snapshot.
    ///
    /// Later entries for the same path win. Every update is reported to the
    /// tracing observer.
    pub fn update<I>(&self, batch: I) -> Self
    where
        I: IntoIterator<Item = (GlobalPath, ComputationResult<T, E>)>,
    {
        self.update_with(batch, UpdatePolicy::Overwrite, &mut TracingObserver)
    }

    /// [`update`](Self::update) with an explicit policy and observer.
    pub fn update_with<I, O>(&self, batch: I, policy: UpdatePolicy, observer: &mut O) -> Self
    where
        I: IntoIterator<Item = (GlobalPath, ComputationResult<T, E>)>,
        O: UpdateObserver<T, E> + ?Sized,
    {
        let version = self.version + 1;
        let mut entries = HashMap::clone(&self.entries);

        for (path, result) in batch {
            let previous = entries.get(&path);
            let outcome = match (policy, previous) {
                (UpdatePolicy::KeepTerminal, Some(prev))
                    if prev.is_terminal() && !result.is_terminal() =>
                {
                    UpdateOutcome::Ignored
                }
                _ => UpdateOutcome::Applied,
            };

            observer.observe(&CacheUpdate {
                version,
                path: &path,
                previous,
                result: &result,
                outcome,
            });

            if outcome == UpdateOutcome::Applied {
                entries.insert(path, result);
            }
        }

        Self {
            entries: Arc::new(entries),
            version,
        }
    }
}

/// Snapshots compare by content; the version is not part of equality.
impl<T: PartialEq, E: PartialEq> PartialEq for ResultCache<T, E> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries) || self.entries == other.entries
    }
}
