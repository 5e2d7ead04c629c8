// src/engine/mod.rs

//! Tracking engine for trackdag.
//!
//! This module ties together:
//! - the computation manager (owner of computations and the published cache)
//! - the core step machine reacting to:
//!   - computation submissions
//!   - progress reports from the execution engine
//!   - shutdown signals
//! - the async runtime loop that feeds events into the core and hands
//!   ready checkpoints to an [`EngineBackend`](crate::exec::EngineBackend).
//!
//! The pure core lives in [`core`]; the async/IO shell is implemented in
//! [`runtime`].

use crate::cache::ComputationResult;
use crate::config::TrackerConfig;
use crate::dag::ExecutionItem;
use crate::path::{ComputationId, GlobalPath, SessionId};

/// Runtime options used by both the core and the async shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeOptions {
    /// Exit once every submitted computation is settled.
    pub exit_when_settled: bool,
}

impl From<&TrackerConfig> for RuntimeOptions {
    fn from(cfg: &TrackerConfig) -> Self {
        Self {
            exit_when_settled: cfg.runtime.exit_when_settled,
        }
    }
}

/// Events flowing into the runtime from the API layer and the engine.
#[derive(Debug, Clone)]
pub enum TrackerEvent<T, E = String> {
    /// A new computation was submitted.
    Submitted {
        session: SessionId,
        computation: ComputationId,
        items: Vec<ExecutionItem>,
    },
    /// The engine reported progress for one or more items.
    Reported {
        updates: Vec<(GlobalPath, ComputationResult<T, E>)>,
    },
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

pub mod core;
pub mod manager;
pub mod runtime;

pub use self::core::{CoreCommand, CoreStep, ManagerCore};
pub use manager::{
    CheckpointRequest, CheckpointStatus, ComputationKey, ComputationManager, SnapshotReader,
    TrackedComputation,
};
pub use runtime::Runtime;
