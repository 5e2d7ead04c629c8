use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use trackdag::cache::ComputationResult;
use trackdag::engine::{CheckpointRequest, TrackerEvent};
use trackdag::errors::Result;
use trackdag::exec::EngineBackend;
use trackdag::path::GlobalPath;

/// A fake execution engine that:
/// - records which checkpoints were requested, in order
/// - immediately reports `Running` then `Done(path)` for each request,
///   or `Failed("engine failure")` for paths listed as failing.
pub struct FakeEngine {
    runtime_tx: mpsc::Sender<TrackerEvent<String>>,
    requested: Arc<Mutex<Vec<GlobalPath>>>,
    failing: HashSet<GlobalPath>,
}

impl FakeEngine {
    pub fn new(
        runtime_tx: mpsc::Sender<TrackerEvent<String>>,
        requested: Arc<Mutex<Vec<GlobalPath>>>,
    ) -> Self {
        Self {
            runtime_tx,
            requested,
            failing: HashSet::new(),
        }
    }

    pub fn failing(mut self, path: GlobalPath) -> Self {
        self.failing.insert(path);
        self
    }
}

impl EngineBackend for FakeEngine {
    fn request_checkpoints(
        &mut self,
        requests: Vec<CheckpointRequest>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        let tx = self.runtime_tx.clone();
        let requested = Arc::clone(&self.requested);
        let failing = self.failing.clone();

        Box::pin(async move {
            for request in requests {
                {
                    let mut guard = requested.lock().unwrap();
                    guard.push(request.path.clone());
                }

                let outcome = if failing.contains(&request.path) {
                    ComputationResult::Failed("engine failure".to_string())
                } else {
                    ComputationResult::Done(request.path.to_string())
                };

                tx.send(TrackerEvent::Reported {
                    updates: vec![
                        (request.path.clone(), ComputationResult::Running),
                        (request.path, outcome),
                    ],
                })
                .await
                .map_err(anyhow::Error::from)?;
            }
            Ok(())
        })
    }
}
