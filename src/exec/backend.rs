// src/exec/backend.rs

//! Pluggable engine backend abstraction.
//!
//! The runtime hands ready checkpoints to an `EngineBackend` rather than
//! talking to the distributed execution engine directly, so tests can swap
//! in a fake engine that reports results straight back into the runtime.
//!
//! - `ChannelBackend` forwards requests over an mpsc channel to whatever
//!   task drives the real engine.

use std::future::Future;
use std::pin::Pin;

use tokio::sync::mpsc;

use crate::engine::CheckpointRequest;
use crate::errors::{Error, Result};

/// How checkpoint requests reach the execution engine.
pub trait EngineBackend: Send {
    /// Ask the engine to materialize the given checkpoints.
    ///
    /// Progress comes back asynchronously as `TrackerEvent::Reported`.
    fn request_checkpoints(
        &mut self,
        requests: Vec<CheckpointRequest>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Backend that forwards every request over an mpsc channel.
#[derive(Debug, Clone)]
pub struct ChannelBackend {
    tx: mpsc::Sender<CheckpointRequest>,
}

impl ChannelBackend {
    pub fn new(tx: mpsc::Sender<CheckpointRequest>) -> Self {
        Self { tx }
    }

    /// Backend plus the receiving end for the engine driver.
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<CheckpointRequest>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self::new(tx), rx)
    }
}

impl EngineBackend for ChannelBackend {
    fn request_checkpoints(
        &mut self,
        requests: Vec<CheckpointRequest>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let tx = self.tx.clone();

        Box::pin(async move {
            for request in requests {
                tx.send(request).await.map_err(Error::from)?;
            }
            Ok(())
        })
    }
}
