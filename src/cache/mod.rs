// src/cache/mod.rs

//! Result cache: immutable snapshots of per-item results, derived from one
//! another in batches as the execution engine reports progress.

pub mod observer;
pub mod result;
pub mod snapshot;

pub use observer::{CacheUpdate, NoopObserver, TracingObserver, UpdateObserver, UpdateOutcome};
pub use result::ComputationResult;
pub use snapshot::ResultCache;
pub use crate::types::UpdatePolicy;
