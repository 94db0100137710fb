//! Configuration surface exposed to the embedding application.
//!
//! Describes what to play (a single URL or a list of renditions), the
//! optional adaptive streaming mode, display metadata and the timings
//! of the interaction layer. All configurations are serializable to/from
//! TOML format.

mod adaptive;
mod interaction;
mod loading;
mod source;

#[cfg(test)]
mod tests;

pub use adaptive::{AdaptiveMode, AdaptiveOptions};
pub use interaction::InteractionConfig;
pub use source::{Rendition, SourceConfig};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{PlaydeckError, Result, services::player::DeviceClass};

/// Subtitle track metadata attached to the media element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SubtitleTrack {
    /// Location of the subtitle file (usually WebVTT).
    pub src: String,

    /// Language tag of the track, e.g. "en".
    #[serde(default)]
    pub lang: Option<String>,
}

/// Main configuration structure for a player instance.
///
/// Only `source` is required; every other section falls back to
/// defaults when omitted.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PlayerConfig {
    /// Title text shown by the view layer.
    #[serde(default)]
    pub title: Option<String>,

    /// Poster image shown before playback starts.
    #[serde(default)]
    pub poster: Option<String>,

    /// Optional subtitle track.
    #[serde(default)]
    pub track: Option<SubtitleTrack>,

    /// What to play.
    pub source: SourceConfig,

    /// Adaptive streaming mode. `false` plays sources natively.
    #[serde(default)]
    pub adaptive: AdaptiveMode,

    /// Timing parameters of the interaction layer.
    #[serde(default)]
    pub interaction: InteractionConfig,

    /// Forces a device class instead of detecting it from the host.
    #[serde(default)]
    pub device: Option<DeviceClass>,
}

impl PlayerConfig {
    /// Creates a configuration playing `source` with default settings.
    pub fn new(source: SourceConfig) -> Self {
        Self {
            title: None,
            poster: None,
            track: None,
            source,
            adaptive: AdaptiveMode::default(),
            interaction: InteractionConfig::default(),
            device: None,
        }
    }

    /// Checks cross-field constraints that serde cannot express.
    ///
    /// # Errors
    /// Returns `PlaydeckError::InvalidConfigField` for the first offending field.
    pub fn validate(&self) -> Result<()> {
        self.source.validate()?;
        self.interaction.validate()?;

        if let Some(track) = &self.track {
            if track.src.trim().is_empty() {
                return Err(PlaydeckError::invalid_field(
                    "track",
                    "src",
                    "subtitle source must not be empty",
                ));
            }
        }

        Ok(())
    }

    /// Exports the JSON schema of the configuration, for editors and docs.
    ///
    /// # Errors
    /// Returns `PlaydeckError::Schema` if serialization fails.
    pub fn schema_json() -> Result<String> {
        let schema = schemars::schema_for!(PlayerConfig);
        Ok(serde_json::to_string_pretty(&schema)?)
    }
}
