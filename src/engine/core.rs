// src/engine/core.rs

//! Pure core state machine.
//!
//! Consumes [`TrackerEvent`]s and produces an updated manager state plus a
//! list of commands for the IO shell. No channels, no Tokio types, no IO,
//! so it can be driven step by step in tests.

use tracing::{info, warn};

use crate::config::TrackerConfig;
use crate::engine::manager::{CheckpointRequest, ComputationManager, SnapshotReader};
use crate::engine::{RuntimeOptions, TrackerEvent};

/// Command produced by the core, to be executed by the outer IO shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreCommand {
    /// Ask the engine to materialize these checkpoints.
    RequestCheckpoints(Vec<CheckpointRequest>),
    /// Request that the runtime exits (everything settled).
    RequestExit,
}

/// Decision returned by the core after handling a single event.
#[derive(Debug, Clone)]
pub struct CoreStep {
    pub commands: Vec<CoreCommand>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

#[derive(Debug)]
pub struct ManagerCore<T, E = String> {
    manager: ComputationManager<T, E>,
    options: RuntimeOptions,
}

impl<T: Clone, E: Clone> ManagerCore<T, E> {
    pub fn new(manager: ComputationManager<T, E>, options: RuntimeOptions) -> Self {
        Self { manager, options }
    }

    /// Fresh manager and options, both taken from `cfg`.
    pub fn from_config(cfg: &TrackerConfig) -> Self {
        Self::new(ComputationManager::new(cfg), RuntimeOptions::from(cfg))
    }

    pub fn manager(&self) -> &ComputationManager<T, E> {
        &self.manager
    }

    pub fn reader(&self) -> SnapshotReader<T, E> {
        self.manager.reader()
    }

    /// Handle one event and return the resulting commands.
    pub fn step(&mut self, event: TrackerEvent<T, E>) -> CoreStep {
        match event {
            TrackerEvent::Submitted {
                session,
                computation,
                items,
            } => {
                if let Err(err) = self.manager.submit(session.clone(), computation.clone(), items) {
                    warn!(
                        session = %session,
                        computation = %computation,
                        error = %err,
                        "submission rejected"
                    );
                }
                self.advance()
            }
            TrackerEvent::Reported { updates } => {
                self.manager.report(updates);
                self.advance()
            }
            TrackerEvent::ShutdownRequested => CoreStep {
                commands: Vec::new(),
                keep_running: false,
            },
        }
    }

    /// Dispatch whatever became ready, then check for exit.
    fn advance(&mut self) -> CoreStep {
        let mut commands = Vec::new();

        let ready = self.manager.take_ready();
        if !ready.is_empty() {
            commands.push(CoreCommand::RequestCheckpoints(ready));
        }

        let settled = self.manager.computations().next().is_some() && self.manager.is_settled();
        if self.options.exit_when_settled && settled {
            info!("all computations settled; requesting exit");
            commands.push(CoreCommand::RequestExit);
            return CoreStep {
                commands,
                keep_running: false,
            };
        }

        CoreStep {
            commands,
            keep_running: true,
        }
    }
}
