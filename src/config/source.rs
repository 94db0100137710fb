use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{PlaydeckError, Result};

/// One concrete encoded version of the content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Rendition {
    /// Location of the media or manifest.
    pub src: String,

    /// Vertical resolution, `0` meaning adaptive/auto.
    #[serde(default)]
    pub quality: u32,
}

impl Rendition {
    /// Create a rendition at the given quality.
    pub fn new(src: impl Into<String>, quality: u32) -> Self {
        Self {
            src: src.into(),
            quality,
        }
    }

    /// Whether this rendition lets the streaming engine pick the quality.
    pub fn is_auto(&self) -> bool {
        self.quality == 0
    }
}

/// What the player should load.
///
/// Accepts either a bare URL string or a list of renditions:
///
/// ```toml
/// source = "https://cdn.example/movie.m3u8"
/// # or
/// source = [{ src = "720.mp4", quality = 720 }, { src = "480.mp4", quality = 480 }]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum SourceConfig {
    /// Single source, treated as an auto-quality rendition.
    Url(String),
    /// Several renditions of the same content.
    Renditions(Vec<Rendition>),
}

impl SourceConfig {
    /// Renditions sorted by descending quality.
    pub fn renditions(&self) -> Vec<Rendition> {
        match self {
            SourceConfig::Url(src) => vec![Rendition::new(src.clone(), 0)],
            SourceConfig::Renditions(list) => {
                let mut sorted = list.clone();
                sorted.sort_by(|a, b| b.quality.cmp(&a.quality));
                sorted
            }
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            SourceConfig::Url(src) if src.trim().is_empty() => Err(PlaydeckError::invalid_field(
                "source",
                "url",
                "source URL must not be empty",
            )),
            SourceConfig::Url(_) => Ok(()),
            SourceConfig::Renditions(list) => {
                if list.is_empty() {
                    return Err(PlaydeckError::invalid_field(
                        "source",
                        "renditions",
                        "at least one rendition is required",
                    ));
                }

                let mut seen = HashSet::new();
                for rendition in list {
                    if rendition.src.trim().is_empty() {
                        return Err(PlaydeckError::invalid_field(
                            "source",
                            "src",
                            format!("rendition {} has an empty source", rendition.quality),
                        ));
                    }
                    if !seen.insert(rendition.quality) {
                        return Err(PlaydeckError::invalid_field(
                            "source",
                            "quality",
                            format!("quality {} is listed twice", rendition.quality),
                        ));
                    }
                }

                Ok(())
            }
        }
    }
}

impl From<&str> for SourceConfig {
    fn from(url: &str) -> Self {
        SourceConfig::Url(url.to_string())
    }
}

impl From<Vec<Rendition>> for SourceConfig {
    fn from(renditions: Vec<Rendition>) -> Self {
        SourceConfig::Renditions(renditions)
    }
}
