use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

static MOBILE_USER_AGENT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)Android|webOS|iPhone|iPad|iPod|BlackBerry|IEMobile|Opera Mini|Mobi").ok()
});

/// Input class of the device hosting the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    /// Touch screen: taps toggle controls, double taps seek
    Touch,
    /// Mouse and keyboard: pointer movement shows controls
    #[default]
    Pointer,
}

impl DeviceClass {
    /// Classify a device from its user agent string.
    pub fn from_user_agent(user_agent: &str) -> Self {
        match MOBILE_USER_AGENT.as_ref() {
            Some(pattern) if pattern.is_match(user_agent) => DeviceClass::Touch,
            _ => DeviceClass::Pointer,
        }
    }

    /// Whether this is a touch device.
    pub fn is_touch(self) -> bool {
        self == DeviceClass::Touch
    }
}

/// Format seconds as `mm:ss`.
///
/// Negative or non-finite values render as `00:00`; minutes are not
/// wrapped into hours.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "00:00".to_string();
    }

    let total = seconds.floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Human label of a rendition quality: `Auto`, `720p`, `4k`.
pub fn format_quality(quality: u32) -> String {
    match quality {
        0 => "Auto".to_string(),
        q if q < 1000 => format!("{q}p"),
        q if q % 1000 == 0 => format!("{}k", q / 1000),
        q => format!("{}k", f64::from(q) / 1000.0),
    }
}

/// Fraction of `width` covered by `offset`, clamped to `[0, 1]`.
pub fn pointer_fraction(offset: f64, width: f64) -> f64 {
    if width <= 0.0 || !offset.is_finite() {
        return 0.0;
    }
    (offset / width).clamp(0.0, 1.0)
}

/// `part / whole` as a percentage in `[0, 100]`, `0` for an unknown whole.
pub fn percentage(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 || !whole.is_finite() || !part.is_finite() {
        return 0.0;
    }
    (part / whole * 100.0).clamp(0.0, 100.0)
}
