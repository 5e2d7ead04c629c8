// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::path::{ComputationId, GlobalPath};

#[derive(Error, Debug)]
pub enum TrackdagError {
    /// A direct or logical dependency names a path that was not submitted
    /// before the item referencing it.
    #[error("item '{item}' depends on '{missing}', which does not appear earlier in the submission")]
    OutOfTopologicalOrder {
        item: GlobalPath,
        missing: GlobalPath,
    },

    #[error("item '{item}' appears more than once in the submission")]
    DuplicateItem { item: GlobalPath },

    /// The last submitted item is not a `Local` node (or nothing was submitted).
    #[error("{}", missing_terminal_message(.last))]
    MissingTerminalLocal { last: Option<GlobalPath> },

    #[error("computation '{0}' has no local output item")]
    NoOutput(ComputationId),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("item '{item}' does not belong to computation '{computation}'")]
    ForeignItem { item: GlobalPath, computation: String },

    #[error("Computation already submitted: {0}")]
    DuplicateComputation(String),

    #[error("Computation not found: {0}")]
    UnknownComputation(String),

    #[error("submission has {count} items, limit is {limit}")]
    TooManyItems { count: usize, limit: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn missing_terminal_message(last: &Option<GlobalPath>) -> String {
    match last {
        Some(path) => format!("last item '{path}' must have local locality"),
        None => "computation must contain at least one item".to_string(),
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, TrackdagError>;
