// src/exec/mod.rs

//! Boundary to the distributed execution engine.
//!
//! - [`backend`] provides the `EngineBackend` trait the runtime dispatches
//!   through, and a `ChannelBackend` that forwards requests over mpsc.

pub mod backend;

pub use backend::{ChannelBackend, EngineBackend};
