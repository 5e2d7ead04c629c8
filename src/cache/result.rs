// src/cache/result.rs

use std::fmt;

/// Reported state of one tracked item.
///
/// `T` is the materialized value and `E` the error detail; both are opaque
/// to the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComputationResult<T, E = String> {
    Scheduled,
    Running,
    Done(T),
    Failed(E),
}

impl<T, E> ComputationResult<T, E> {
    /// `Done` or `Failed`: no further transition expected.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ComputationResult::Done(_) | ComputationResult::Failed(_))
    }

    pub fn is_done(&self) -> bool {
        matches!(self, ComputationResult::Done(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            ComputationResult::Done(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&E> {
        match self {
            ComputationResult::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Payload-free name of the state, for logs and status listings.
    pub fn state_name(&self) -> &'static str {
        match self {
            ComputationResult::Scheduled => "scheduled",
            ComputationResult::Running => "running",
            ComputationResult::Done(_) => "done",
            ComputationResult::Failed(_) => "failed",
        }
    }
}

impl<T, E> fmt::Display for ComputationResult<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.state_name())
    }
}
