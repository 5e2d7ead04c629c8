// src/dag/mod.rs

//! Computation DAG representation.
//!
//! - [`item`] holds the execution items submitted by the graph builder.
//! - [`computation`] validates an ordered item list into an immutable DAG.
//! - [`closure`] collapses dependencies onto tracked (`Local`) items.
//! - [`graph`] orders tracked checkpoints for requesting them from the engine.

pub mod closure;
pub mod computation;
pub mod graph;
pub mod item;

pub use closure::{DependencyMap, tracked_dependencies};
pub use computation::Computation;
pub use graph::TrackedGraph;
pub use item::{ExecutionItem, Locality};
