// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{RawTrackerConfig, TrackerConfig};
use crate::config::plan::{Plan, PlanFile};
use crate::errors::Result;

/// Read and deserialize a config file without semantic validation.
///
/// Use [`load_and_validate`] for the checked form.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawTrackerConfig> {
    let contents = fs::read_to_string(path.as_ref())?;
    let config: RawTrackerConfig = toml::from_str(&contents)?;
    Ok(config)
}

/// Read, deserialize and validate a config file.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<TrackerConfig> {
    let raw = load_from_path(&path)?;
    TrackerConfig::try_from(raw)
}

/// Like [`load_and_validate`], but a missing file yields the defaults.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<TrackerConfig> {
    let path = path.as_ref();
    if !path.exists() {
        debug!(path = %path.display(), "no config file; using defaults");
        return Ok(TrackerConfig::default());
    }
    load_and_validate(path)
}

/// Read a plan file and lift it into execution items.
///
/// This does not validate ordering; pass the items to
/// [`Computation::create`](crate::dag::Computation::create) for that.
pub fn load_plan(path: impl AsRef<Path>) -> Result<Plan> {
    let contents = fs::read_to_string(path.as_ref())?;
    let file: PlanFile = toml::from_str(&contents)?;
    Plan::try_from(file)
}

/// Default config location: `Trackdag.toml` in the working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Trackdag.toml")
}
