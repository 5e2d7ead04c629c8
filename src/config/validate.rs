// src/config/validate.rs

use crate::config::model::{RawTrackerConfig, TrackerConfig};
use crate::errors::{Result, TrackdagError};

impl TryFrom<RawTrackerConfig> for TrackerConfig {
    type Error = TrackdagError;

    fn try_from(raw: RawTrackerConfig) -> std::result::Result<Self, Self::Error> {
        validate_config(&raw)?;
        Ok(TrackerConfig::new_unchecked(raw.cache, raw.runtime, raw.limits))
    }
}

pub fn validate_config(cfg: &RawTrackerConfig) -> Result<()> {
    validate_runtime(cfg)?;
    validate_limits(cfg)?;
    Ok(())
}

fn validate_runtime(cfg: &RawTrackerConfig) -> Result<()> {
    if cfg.runtime.event_buffer == 0 {
        return Err(TrackdagError::ConfigError(
            "[runtime].event_buffer must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_limits(cfg: &RawTrackerConfig) -> Result<()> {
    if cfg.limits.max_items == 0 {
        return Err(TrackdagError::ConfigError(
            "[limits].max_items must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}
