// src/config/mod.rs

//! Configuration loading and validation for trackdag.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load config and plan files from disk (`loader.rs`).
//! - Validate basic invariants (`validate.rs`).
//! - Lift plan files into execution items (`plan.rs`).

pub mod loader;
pub mod model;
pub mod plan;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, load_or_default, load_plan};
pub use model::{CacheSection, LimitsSection, RawTrackerConfig, RuntimeSection, TrackerConfig};
pub use plan::{Plan, PlanFile, PlanItem};
pub use validate::validate_config;
