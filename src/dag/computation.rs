// src/dag/computation.rs

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::dag::closure::{DependencyMap, tracked_dependencies};
use crate::dag::item::{ExecutionItem, Locality};
use crate::errors::{Result, TrackdagError};
use crate::path::{ComputationId, GlobalPath};

/// A validated, immutable DAG of execution items in topological order.
///
/// The only way to obtain one is [`Computation::create`], which guarantees:
/// - every dependency (direct or logical) of an item appears strictly earlier
/// - no two items share a path
/// - the last item is `Local` (the computation's output)
#[derive(Debug, Clone)]
pub struct Computation {
    id: ComputationId,
    items: Vec<ExecutionItem>,
}

impl Computation {
    /// Validate `items` in a single forward pass and wrap them.
    pub fn create(id: ComputationId, items: Vec<ExecutionItem>) -> Result<Self> {
        let mut seen: HashSet<&GlobalPath> = HashSet::with_capacity(items.len());

        for item in &items {
            if let Some(missing) = item.all_deps().find(|dep| !seen.contains(dep)) {
                warn!(
                    computation = %id,
                    item = %item.path,
                    missing = %missing,
                    "dependency not seen before item; rejecting computation"
                );
                return Err(TrackdagError::OutOfTopologicalOrder {
                    item: item.path.clone(),
                    missing: missing.clone(),
                });
            }

            if !seen.insert(&item.path) {
                warn!(computation = %id, item = %item.path, "item path submitted twice; rejecting computation");
                return Err(TrackdagError::DuplicateItem {
                    item: item.path.clone(),
                });
            }
            debug!(computation = %id, item = %item.path, locality = %item.locality, "item validated");
        }

        match items.last() {
            Some(last) if last.locality == Locality::Local => {}
            last => {
                return Err(TrackdagError::MissingTerminalLocal {
                    last: last.map(|item| item.path.clone()),
                });
            }
        }

        Ok(Self { id, items })
    }

    pub fn id(&self) -> &ComputationId {
        &self.id
    }

    /// All items in submission (topological) order.
    pub fn items(&self) -> &[ExecutionItem] {
        &self.items
    }

    /// The `Local` items, in submission order.
    pub fn tracked_items(&self) -> impl Iterator<Item = &ExecutionItem> {
        self.items.iter().filter(|item| item.is_tracked())
    }

    pub fn tracked_paths(&self) -> Vec<GlobalPath> {
        self.tracked_items().map(|item| item.path.clone()).collect()
    }

    pub fn all_paths(&self) -> Vec<GlobalPath> {
        self.items.iter().map(|item| item.path.clone()).collect()
    }

    pub fn is_tracked(&self, path: &GlobalPath) -> bool {
        self.tracked_items().any(|item| &item.path == path)
    }

    /// The terminal `Local` item.
    pub fn output(&self) -> Result<&ExecutionItem> {
        self.items
            .iter()
            .rev()
            .find(|item| item.is_tracked())
            .ok_or_else(|| TrackdagError::NoOutput(self.id.clone()))
    }

    /// Direct and logical dependencies combined, per item path.
    pub fn dependency_map(&self) -> DependencyMap {
        let mut map: DependencyMap = HashMap::with_capacity(self.items.len());
        for item in &self.items {
            map.insert(item.path.clone(), item.all_deps().cloned().collect());
        }
        map
    }

    /// Tracked-to-tracked dependencies with untracked chains collapsed.
    pub fn tracked_dependencies(&self) -> DependencyMap {
        tracked_dependencies(&self.tracked_paths(), &self.all_paths(), &self.dependency_map())
    }
}
