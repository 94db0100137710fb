use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Options for the adaptive streaming session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AdaptiveOptions {
    /// Fatal errors the session may try to recover from before giving up.
    #[serde(default = "default_max_recovery_attempts")]
    pub max_recovery_attempts: u32,

    /// Options forwarded verbatim to the streaming engine.
    #[serde(flatten)]
    pub engine: BTreeMap<String, serde_json::Value>,
}

fn default_max_recovery_attempts() -> u32 {
    3
}

impl Default for AdaptiveOptions {
    fn default() -> Self {
        Self {
            max_recovery_attempts: default_max_recovery_attempts(),
            engine: BTreeMap::new(),
        }
    }
}

/// Whether sources are delivered through the adaptive streaming engine.
///
/// Mirrors the usual `adaptive = true` / `[adaptive] ...` shorthand:
/// a boolean toggles the engine with default options, a table enables
/// it with the given options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum AdaptiveMode {
    /// Engine on or off with default options.
    Enabled(bool),
    /// Engine on with explicit options.
    Options(AdaptiveOptions),
}

impl Default for AdaptiveMode {
    fn default() -> Self {
        AdaptiveMode::Enabled(false)
    }
}

impl AdaptiveMode {
    /// Whether adaptive delivery was requested.
    pub fn is_enabled(&self) -> bool {
        match self {
            AdaptiveMode::Enabled(enabled) => *enabled,
            AdaptiveMode::Options(_) => true,
        }
    }

    /// Effective options, or `None` when adaptive delivery is off.
    pub fn options(&self) -> Option<AdaptiveOptions> {
        match self {
            AdaptiveMode::Enabled(true) => Some(AdaptiveOptions::default()),
            AdaptiveMode::Enabled(false) => None,
            AdaptiveMode::Options(options) => Some(options.clone()),
        }
    }
}
