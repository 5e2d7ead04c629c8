// src/dag/graph.rs

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::dag::closure::DependencyMap;
use crate::errors::{Result, TrackdagError};
use crate::path::GlobalPath;

/// Tracked checkpoints and the collapsed edges between them.
///
/// Edge direction: dependency -> dependent. For a closure `C: [A]` we add
/// edge `A -> C`.
#[derive(Debug, Clone)]
pub struct TrackedGraph {
    /// Tracked paths in submission order; node weights index into this.
    paths: Vec<GlobalPath>,
    index: HashMap<GlobalPath, usize>,
    graph: DiGraphMap<usize, ()>,
}

impl TrackedGraph {
    /// Build from submission-ordered tracked paths and their closures.
    pub fn new(tracked: &[GlobalPath], closures: &DependencyMap) -> Self {
        let mut paths: Vec<GlobalPath> = Vec::with_capacity(tracked.len());
        let mut index: HashMap<GlobalPath, usize> = HashMap::with_capacity(tracked.len());
        let mut graph: DiGraphMap<usize, ()> = DiGraphMap::new();

        for path in tracked {
            if index.contains_key(path) {
                continue;
            }
            index.insert(path.clone(), paths.len());
            graph.add_node(paths.len());
            paths.push(path.clone());
        }

        for (dependent, path) in paths.iter().enumerate() {
            for dep in closures.get(path).map(Vec::as_slice).unwrap_or(&[]) {
                if let Some(&dependency) = index.get(dep) {
                    graph.add_edge(dependency, dependent, ());
                }
            }
        }

        Self { paths, index, graph }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// An order in which checkpoints can be requested so that every
    /// checkpoint comes after all of its prerequisites.
    pub fn request_order(&self) -> Result<Vec<&GlobalPath>> {
        let order = toposort(&self.graph, None).map_err(|cycle| {
            TrackdagError::Other(anyhow::anyhow!(
                "cycle in tracked graph involving '{}'",
                self.paths[cycle.node_id()]
            ))
        })?;
        Ok(order.into_iter().map(|idx| &self.paths[idx]).collect())
    }

    /// Checkpoints that must be known before `path`.
    pub fn prerequisites_of(&self, path: &GlobalPath) -> Vec<&GlobalPath> {
        self.neighbors(path, Direction::Incoming)
    }

    /// Checkpoints waiting on `path`.
    pub fn dependents_of(&self, path: &GlobalPath) -> Vec<&GlobalPath> {
        self.neighbors(path, Direction::Outgoing)
    }

    /// Checkpoints with no tracked prerequisites.
    pub fn roots(&self) -> Vec<&GlobalPath> {
        self.graph
            .nodes()
            .filter(|&idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .map(|idx| &self.paths[idx])
            .collect()
    }

    fn neighbors(&self, path: &GlobalPath, direction: Direction) -> Vec<&GlobalPath> {
        let Some(&idx) = self.index.get(path) else {
            return Vec::new();
        };
        let mut found: Vec<usize> = self.graph.neighbors_directed(idx, direction).collect();
        found.sort_unstable();
        found.into_iter().map(|i| &self.paths[i]).collect()
    }
}
