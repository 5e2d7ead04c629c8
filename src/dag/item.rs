// src/dag/item.rs

//! Execution items as handed over by the graph-construction layer.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::path::GlobalPath;

/// Where an item's result lives.
///
/// - `Local`: observable checkpoint, tracked and cached individually.
/// - `Distributed`: internal to the execution engine; never tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locality {
    Local,
    Distributed,
}

impl Locality {
    pub fn is_tracked(self) -> bool {
        matches!(self, Locality::Local)
    }
}

impl fmt::Display for Locality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locality::Local => f.write_str("local"),
            Locality::Distributed => f.write_str("distributed"),
        }
    }
}

impl FromStr for Locality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Locality::Local),
            "distributed" => Ok(Locality::Distributed),
            other => Err(format!(
                "invalid locality: {other} (expected \"local\" or \"distributed\")"
            )),
        }
    }
}

/// One unit of work in a submitted computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionItem {
    pub path: GlobalPath,
    pub locality: Locality,
    /// Data-flow dependencies.
    pub deps: Vec<GlobalPath>,
    /// Ordering-only dependencies.
    pub logical_deps: Vec<GlobalPath>,
}

impl ExecutionItem {
    pub fn new(path: GlobalPath, locality: Locality) -> Self {
        Self {
            path,
            locality,
            deps: Vec::new(),
            logical_deps: Vec::new(),
        }
    }

    pub fn with_deps(mut self, deps: impl IntoIterator<Item = GlobalPath>) -> Self {
        self.deps.extend(deps);
        self
    }

    pub fn with_logical_deps(mut self, deps: impl IntoIterator<Item = GlobalPath>) -> Self {
        self.logical_deps.extend(deps);
        self
    }

    pub fn is_tracked(&self) -> bool {
        self.locality.is_tracked()
    }

    /// Direct then logical dependencies, in declaration order.
    pub fn all_deps(&self) -> impl Iterator<Item = &GlobalPath> {
        self.deps.iter().chain(self.logical_deps.iter())
    }
}
