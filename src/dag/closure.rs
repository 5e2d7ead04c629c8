// src/dag/closure.rs

//! Dependency closure over tracked items.
//!
//! Reduces the full dependency graph to edges between tracked items only:
//! an untracked item is replaced by the tracked items it (transitively)
//! depends on. Tracked dependencies are kept as-is and not expanded further,
//! so each closure is the set of tracked checkpoints that must be known
//! before the item itself can be considered ready.
//!
//! Runs in one forward pass over the topological order, O(items + edges).

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::path::GlobalPath;

/// Path -> list of paths it depends on.
pub type DependencyMap = HashMap<GlobalPath, Vec<GlobalPath>>;

/// Compute the tracked-dependency closure.
///
/// - `tracked`: tracked paths (any order).
/// - `order`: every path, in topological order.
/// - `deps`: combined direct + logical dependencies per path.
///
/// The result has exactly one entry per tracked path appearing in `order`.
/// Values contain no duplicates and keep first-encounter order.
pub fn tracked_dependencies(
    tracked: &[GlobalPath],
    order: &[GlobalPath],
    deps: &DependencyMap,
) -> DependencyMap {
    let tracked: HashSet<&GlobalPath> = tracked.iter().collect();

    // Untracked path -> closure of tracked ancestors.
    let mut intermediate: DependencyMap = HashMap::new();
    let mut result: DependencyMap = HashMap::new();

    for path in order {
        let closure = collapse(path, deps, &tracked, &intermediate);

        if tracked.contains(path) {
            debug!(path = %path, deps = closure.len(), "tracked closure computed");
            result.insert(path.clone(), closure);
        } else {
            intermediate.insert(path.clone(), closure);
        }
    }

    result
}

/// Direct deps of `path` with every untracked dep replaced by its closure.
fn collapse(
    path: &GlobalPath,
    deps: &DependencyMap,
    tracked: &HashSet<&GlobalPath>,
    intermediate: &DependencyMap,
) -> Vec<GlobalPath> {
    let mut closure = Vec::new();
    let mut in_closure: HashSet<&GlobalPath> = HashSet::new();

    for dep in deps.get(path).map(Vec::as_slice).unwrap_or(&[]) {
        if tracked.contains(dep) {
            if in_closure.insert(dep) {
                closure.push(dep.clone());
            }
            continue;
        }

        // Ancestors are always processed first in topological order.
        let Some(inlined) = intermediate.get(dep) else {
            warn!(path = %path, dep = %dep, "dependency has no computed closure; skipping");
            continue;
        };
        for ancestor in inlined {
            if in_closure.insert(ancestor) {
                closure.push(ancestor.clone());
            }
        }
    }

    closure
}
