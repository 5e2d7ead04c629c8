// src/engine/runtime.rs

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::TrackerConfig;
use crate::engine::manager::{CheckpointRequest, SnapshotReader};
use crate::engine::{CoreCommand, ManagerCore, TrackerEvent};
use crate::errors::Result;
use crate::exec::EngineBackend;

/// Async shell around [`ManagerCore`].
///
/// Reads [`TrackerEvent`]s from a channel, feeds them to the core, and hands
/// ready checkpoints to an [`EngineBackend`]. All semantics live in the core.
pub struct Runtime<T, E, B: EngineBackend> {
    core: ManagerCore<T, E>,
    event_rx: mpsc::Receiver<TrackerEvent<T, E>>,
    backend: B,
}

impl<T: fmt::Debug, E: fmt::Debug, B: EngineBackend> fmt::Debug for Runtime<T, E, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<T, E, B> Runtime<T, E, B>
where
    T: Clone + Send + Sync,
    E: Clone + Send + Sync,
    B: EngineBackend,
{
    pub fn new(
        core: ManagerCore<T, E>,
        event_rx: mpsc::Receiver<TrackerEvent<T, E>>,
        backend: B,
    ) -> Self {
        Self {
            core,
            event_rx,
            backend,
        }
    }

    /// Build a runtime from `cfg`: the event channel holds
    /// `runtime.event_buffer` events and the core exits when settled if
    /// `runtime.exit_when_settled` is set.
    ///
    /// Returns the sender the API layer and the engine use to feed events.
    pub fn from_config(cfg: &TrackerConfig, backend: B) -> (mpsc::Sender<TrackerEvent<T, E>>, Self) {
        let (event_tx, event_rx) = mpsc::channel(cfg.runtime.event_buffer);
        let runtime = Self::new(ManagerCore::from_config(cfg), event_rx, backend);
        (event_tx, runtime)
    }

    /// Read handle for status queries while the runtime is running.
    pub fn reader(&self) -> SnapshotReader<T, E> {
        self.core.reader()
    }

    /// Main event loop. Returns the core so callers can inspect final state.
    pub async fn run(mut self) -> Result<ManagerCore<T, E>> {
        info!("trackdag runtime started");

        loop {
            let Some(event) = self.event_rx.recv().await else {
                info!("runtime event channel closed; exiting");
                break;
            };

            debug!(event = event_name(&event), "runtime received event");

            let step = self.core.step(event);

            for command in step.commands {
                self.execute_command(command).await?;
            }

            if !step.keep_running {
                info!("core requested exit; stopping runtime");
                break;
            }
        }

        Ok(self.core)
    }

    async fn execute_command(&mut self, command: CoreCommand) -> Result<()> {
        match command {
            CoreCommand::RequestCheckpoints(requests) => self.request(requests).await,
            CoreCommand::RequestExit => {
                debug!("core issued RequestExit command");
                Ok(())
            }
        }
    }

    async fn request(&mut self, requests: Vec<CheckpointRequest>) -> Result<()> {
        if requests.is_empty() {
            return Ok(());
        }

        let paths: Vec<String> = requests.iter().map(|r| r.path.to_string()).collect();
        debug!(?paths, "requesting checkpoints from engine");

        self.backend.request_checkpoints(requests).await
    }
}

fn event_name<T, E>(event: &TrackerEvent<T, E>) -> &'static str {
    match event {
        TrackerEvent::Submitted { .. } => "submitted",
        TrackerEvent::Reported { .. } => "reported",
        TrackerEvent::ShutdownRequested => "shutdown",
    }
}
