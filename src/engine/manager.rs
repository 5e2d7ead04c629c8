// src/engine/manager.rs

//! Owner of submitted computations and of the published result cache.
//!
//! The manager is the single writer: it derives a new [`ResultCache`]
//! snapshot for every batch of changes and publishes it wholesale. Readers
//! obtained through [`ComputationManager::reader`] only ever see complete
//! snapshots, possibly one batch behind.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, RwLock};

use tracing::{debug, info, warn};

use crate::cache::{ComputationResult, ResultCache, TracingObserver, UpdatePolicy};
use crate::config::TrackerConfig;
use crate::dag::{Computation, DependencyMap, ExecutionItem, TrackedGraph};
use crate::errors::{Result, TrackdagError};
use crate::path::{ComputationId, GlobalPath, SessionId};

/// Key of a submitted computation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComputationKey {
    pub session: SessionId,
    pub computation: ComputationId,
}

impl ComputationKey {
    pub fn new(session: SessionId, computation: ComputationId) -> Self {
        Self {
            session,
            computation,
        }
    }

    pub fn of(path: &GlobalPath) -> Self {
        Self::new(path.session().clone(), path.computation().clone())
    }
}

impl fmt::Display for ComputationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "//{}/{}", self.session, self.computation)
    }
}

/// A validated computation plus the views derived from it at submission.
#[derive(Debug)]
pub struct TrackedComputation {
    key: ComputationKey,
    computation: Computation,
    tracked: HashSet<GlobalPath>,
    closures: DependencyMap,
    graph: TrackedGraph,
    order: Vec<GlobalPath>,
    output: GlobalPath,
}

impl TrackedComputation {
    fn new(key: ComputationKey, computation: Computation) -> Result<Self> {
        let tracked_paths = computation.tracked_paths();
        let closures = computation.tracked_dependencies();
        let graph = TrackedGraph::new(&tracked_paths, &closures);
        let order = graph.request_order()?.into_iter().cloned().collect();
        let output = computation.output()?.path.clone();

        Ok(Self {
            key,
            tracked: tracked_paths.into_iter().collect(),
            computation,
            closures,
            graph,
            order,
            output,
        })
    }

    pub fn key(&self) -> &ComputationKey {
        &self.key
    }

    pub fn computation(&self) -> &Computation {
        &self.computation
    }

    pub fn is_tracked(&self, path: &GlobalPath) -> bool {
        self.tracked.contains(path)
    }

    /// Tracked-to-tracked dependency map.
    pub fn closures(&self) -> &DependencyMap {
        &self.closures
    }

    pub fn graph(&self) -> &TrackedGraph {
        &self.graph
    }

    /// Tracked paths, prerequisites first.
    pub fn request_order(&self) -> &[GlobalPath] {
        &self.order
    }

    pub fn prerequisites_of(&self, path: &GlobalPath) -> &[GlobalPath] {
        self.closures.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn output(&self) -> &GlobalPath {
        &self.output
    }
}

/// A tracked checkpoint the engine may now be asked to materialize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointRequest {
    pub path: GlobalPath,
    /// Tracked checkpoints it depends on, all already `Done`.
    pub after: Vec<GlobalPath>,
}

/// State of one tracked item, as listed by
/// [`ComputationManager::computation_status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointStatus<T, E = String> {
    pub path: GlobalPath,
    pub state: Option<ComputationResult<T, E>>,
    /// A prerequisite (direct or through other checkpoints) failed.
    pub blocked: bool,
}

/// Cloneable read handle onto the published snapshot.
#[derive(Debug)]
pub struct SnapshotReader<T, E = String> {
    published: Arc<RwLock<ResultCache<T, E>>>,
}

impl<T, E> Clone for SnapshotReader<T, E> {
    fn clone(&self) -> Self {
        Self {
            published: Arc::clone(&self.published),
        }
    }
}

impl<T, E> SnapshotReader<T, E> {
    /// The currently published snapshot.
    pub fn snapshot(&self) -> ResultCache<T, E> {
        match self.published.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl<T: Clone, E: Clone> SnapshotReader<T, E> {
    pub fn status(&self, path: &GlobalPath) -> Option<ComputationResult<T, E>> {
        self.snapshot().status(path).cloned()
    }

    pub fn final_result(&self, path: &GlobalPath) -> Option<T> {
        self.snapshot().final_result(path).cloned()
    }
}

/// Single-writer owner of computations and their results.
#[derive(Debug)]
pub struct ComputationManager<T, E = String> {
    computations: HashMap<ComputationKey, Arc<TrackedComputation>>,
    /// Submission order, for deterministic iteration.
    submitted: Vec<ComputationKey>,
    current: ResultCache<T, E>,
    published: Arc<RwLock<ResultCache<T, E>>>,
    policy: UpdatePolicy,
    max_items: usize,
}

impl<T: Clone, E: Clone> ComputationManager<T, E> {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            computations: HashMap::new(),
            submitted: Vec::new(),
            current: ResultCache::new(),
            published: Arc::new(RwLock::new(ResultCache::new())),
            policy: config.cache.update_policy,
            max_items: config.limits.max_items,
        }
    }

    pub fn policy(&self) -> UpdatePolicy {
        self.policy
    }

    pub fn reader(&self) -> SnapshotReader<T, E> {
        SnapshotReader {
            published: Arc::clone(&self.published),
        }
    }

    /// The writer's current snapshot (identical to the published one).
    pub fn snapshot(&self) -> &ResultCache<T, E> {
        &self.current
    }

    /// Validate and register a computation, seeding its tracked items as
    /// `Scheduled`. Any error rejects the whole submission.
    pub fn submit(
        &mut self,
        session: SessionId,
        computation: ComputationId,
        items: Vec<ExecutionItem>,
    ) -> Result<Arc<TrackedComputation>> {
        let key = ComputationKey::new(session, computation);

        if items.len() > self.max_items {
            return Err(TrackdagError::TooManyItems {
                count: items.len(),
                limit: self.max_items,
            });
        }
        if self.computations.contains_key(&key) {
            return Err(TrackdagError::DuplicateComputation(key.to_string()));
        }
        for item in &items {
            let foreign = std::iter::once(&item.path)
                .chain(item.all_deps())
                .find(|p| !p.belongs_to(&key.session, &key.computation));
            if let Some(path) = foreign {
                return Err(TrackdagError::ForeignItem {
                    item: path.clone(),
                    computation: key.to_string(),
                });
            }
        }

        let computation = Computation::create(key.computation.clone(), items)?;
        let tracked = Arc::new(TrackedComputation::new(key.clone(), computation)?);

        let seeds: Vec<_> = tracked
            .request_order()
            .iter()
            .map(|path| (path.clone(), ComputationResult::Scheduled))
            .collect();
        self.apply(seeds);

        info!(
            computation = %key,
            tracked = tracked.request_order().len(),
            output = %tracked.output(),
            "computation accepted"
        );

        self.computations.insert(key.clone(), Arc::clone(&tracked));
        self.submitted.push(key);
        Ok(tracked)
    }

    /// Record engine reports. Reports for paths that are not tracked items of
    /// a known computation are dropped.
    ///
    /// Returns the version of the published snapshot.
    pub fn report<I>(&mut self, batch: I) -> u64
    where
        I: IntoIterator<Item = (GlobalPath, ComputationResult<T, E>)>,
    {
        let accepted: Vec<_> = batch
            .into_iter()
            .filter(|(path, _)| {
                let known = self
                    .computations
                    .get(&ComputationKey::of(path))
                    .is_some_and(|c| c.is_tracked(path));
                if !known {
                    warn!(path = %path, "report for unknown or untracked path; dropping");
                }
                known
            })
            .collect();

        if !accepted.is_empty() {
            self.apply(accepted);
        }
        self.current.version()
    }

    /// Checkpoints that are `Scheduled` and whose prerequisites are all
    /// `Done`. They are marked `Running` before being returned.
    pub fn take_ready(&mut self) -> Vec<CheckpointRequest> {
        let mut ready = Vec::new();

        for key in &self.submitted {
            let Some(tracked) = self.computations.get(key) else {
                continue;
            };
            for path in tracked.request_order() {
                let scheduled = matches!(self.current.status(path), Some(ComputationResult::Scheduled));
                if !scheduled {
                    continue;
                }
                let after = tracked.prerequisites_of(path);
                let satisfied = after
                    .iter()
                    .all(|dep| self.current.status(dep).is_some_and(ComputationResult::is_done));
                if satisfied {
                    debug!(path = %path, after = after.len(), "checkpoint ready");
                    ready.push(CheckpointRequest {
                        path: path.clone(),
                        after: after.to_vec(),
                    });
                }
            }
        }

        if !ready.is_empty() {
            let running: Vec<_> = ready
                .iter()
                .map(|r| (r.path.clone(), ComputationResult::Running))
                .collect();
            self.apply(running);
        }

        ready
    }

    pub fn status(&self, path: &GlobalPath) -> Option<&ComputationResult<T, E>> {
        self.current.status(path)
    }

    pub fn final_result(&self, path: &GlobalPath) -> Option<&T> {
        self.current.final_result(path)
    }

    pub fn computation(&self, key: &ComputationKey) -> Option<&Arc<TrackedComputation>> {
        self.computations.get(key)
    }

    pub fn computations(&self) -> impl Iterator<Item = &Arc<TrackedComputation>> {
        self.submitted.iter().filter_map(|key| self.computations.get(key))
    }

    /// State of the computation's output item.
    pub fn output_result(&self, key: &ComputationKey) -> Result<Option<&ComputationResult<T, E>>> {
        let tracked = self.lookup(key)?;
        Ok(self.current.status(tracked.output()))
    }

    /// Every tracked item of a computation with its current state, in
    /// request order.
    pub fn computation_status(&self, key: &ComputationKey) -> Result<Vec<CheckpointStatus<T, E>>> {
        let tracked = self.lookup(key)?;
        let blocked = self.blocked_in(tracked);

        Ok(tracked
            .request_order()
            .iter()
            .map(|path| CheckpointStatus {
                path: path.clone(),
                state: self.current.status(path).cloned(),
                blocked: blocked.contains(path),
            })
            .collect())
    }

    /// Whether every submitted computation has a terminal output, or one
    /// that can no longer run because a prerequisite failed.
    pub fn is_settled(&self) -> bool {
        self.computations().all(|tracked| {
            let output = tracked.output();
            self.current.status(output).is_some_and(ComputationResult::is_terminal)
                || self.blocked_in(tracked).contains(output)
        })
    }

    fn lookup(&self, key: &ComputationKey) -> Result<&Arc<TrackedComputation>> {
        self.computations
            .get(key)
            .ok_or_else(|| TrackdagError::UnknownComputation(key.to_string()))
    }

    /// Non-terminal checkpoints downstream of a failed one.
    fn blocked_in(&self, tracked: &TrackedComputation) -> HashSet<GlobalPath> {
        let mut blocked: HashSet<GlobalPath> = HashSet::new();
        for path in tracked.request_order() {
            if self.current.status(path).is_some_and(ComputationResult::is_terminal) {
                continue;
            }
            let upstream_failed = tracked.prerequisites_of(path).iter().any(|dep| {
                blocked.contains(dep)
                    || matches!(self.current.status(dep), Some(ComputationResult::Failed(_)))
            });
            if upstream_failed {
                blocked.insert(path.clone());
            }
        }
        blocked
    }

    fn apply(&mut self, batch: Vec<(GlobalPath, ComputationResult<T, E>)>) {
        self.current = self
            .current
            .update_with(batch, self.policy, &mut TracingObserver);
        self.publish();
    }

    fn publish(&self) {
        let mut guard = match self.published.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = self.current.clone();
        debug!(version = self.current.version(), "published result snapshot");
    }
}
