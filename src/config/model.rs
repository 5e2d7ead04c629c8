// src/config/model.rs

use serde::Deserialize;

use crate::types::UpdatePolicy;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [cache]
/// update_policy = "keep_terminal"
///
/// [runtime]
/// event_buffer = 64
/// exit_when_settled = false
///
/// [limits]
/// max_items = 100000
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawTrackerConfig {
    #[serde(default)]
    pub cache: CacheSection,

    #[serde(default)]
    pub runtime: RuntimeSection,

    #[serde(default)]
    pub limits: LimitsSection,
}

/// Validated configuration. Build it with `TrackerConfig::try_from(raw)`.
#[derive(Debug, Clone, Default)]
pub struct TrackerConfig {
    pub cache: CacheSection,
    pub runtime: RuntimeSection,
    pub limits: LimitsSection,
}

impl TrackerConfig {
    /// Used by `TryFrom<RawTrackerConfig>` once validation has passed.
    pub(crate) fn new_unchecked(
        cache: CacheSection,
        runtime: RuntimeSection,
        limits: LimitsSection,
    ) -> Self {
        Self {
            cache,
            runtime,
            limits,
        }
    }
}

/// `[cache]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheSection {
    #[serde(default)]
    pub update_policy: UpdatePolicy,
}

/// `[runtime]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuntimeSection {
    /// Capacity of the runtime event channel.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,

    /// Stop the runtime once every submitted computation's output is terminal.
    #[serde(default)]
    pub exit_when_settled: bool,
}

fn default_event_buffer() -> usize {
    64
}

impl Default for RuntimeSection {
    fn default() -> Self {
        Self {
            event_buffer: default_event_buffer(),
            exit_when_settled: false,
        }
    }
}

/// `[limits]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsSection {
    /// Maximum number of items in one submitted computation.
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

fn default_max_items() -> usize {
    100_000
}

impl Default for LimitsSection {
    fn default() -> Self {
        Self {
            max_items: default_max_items(),
        }
    }
}
