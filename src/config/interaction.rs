use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{PlaydeckError, Result};

/// Timing parameters of the interaction layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct InteractionConfig {
    /// Delay before visible controls hide again, in milliseconds.
    pub hide_delay_ms: u64,

    /// Hide delay used while the user is dragging a slider.
    pub scrub_hide_delay_ms: u64,

    /// Minimum interval between pointer-move reactions.
    pub pointer_throttle_ms: u64,

    /// Two taps closer than this count as a double tap.
    pub double_tap_window_ms: u64,

    /// How long a single tap waits before toggling the controls.
    /// `0` toggles immediately.
    pub single_tap_debounce_ms: u64,

    /// How long a burst of seek gestures stays active after the last tap.
    pub seek_mode_timeout_ms: u64,

    /// Seconds skipped by one seek gesture or arrow key.
    pub seek_step_secs: u32,

    /// Increment used by the speed step buttons.
    pub speed_step: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            hide_delay_ms: 2500,
            scrub_hide_delay_ms: 1000,
            pointer_throttle_ms: 200,
            double_tap_window_ms: 300,
            single_tap_debounce_ms: 300,
            seek_mode_timeout_ms: 1200,
            seek_step_secs: 10,
            speed_step: 0.25,
        }
    }
}

impl InteractionConfig {
    /// Hide delay as a `Duration`.
    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }

    /// Scrubbing hide delay as a `Duration`.
    pub fn scrub_hide_delay(&self) -> Duration {
        Duration::from_millis(self.scrub_hide_delay_ms)
    }

    /// Pointer throttle interval as a `Duration`.
    pub fn pointer_throttle(&self) -> Duration {
        Duration::from_millis(self.pointer_throttle_ms)
    }

    /// Double-tap window as a `Duration`.
    pub fn double_tap_window(&self) -> Duration {
        Duration::from_millis(self.double_tap_window_ms)
    }

    /// Single-tap debounce as a `Duration`.
    pub fn single_tap_debounce(&self) -> Duration {
        Duration::from_millis(self.single_tap_debounce_ms)
    }

    /// Seek-mode timeout as a `Duration`.
    pub fn seek_mode_timeout(&self) -> Duration {
        Duration::from_millis(self.seek_mode_timeout_ms)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let positive = [
            ("hide_delay_ms", self.hide_delay_ms),
            ("scrub_hide_delay_ms", self.scrub_hide_delay_ms),
            ("double_tap_window_ms", self.double_tap_window_ms),
            ("seek_mode_timeout_ms", self.seek_mode_timeout_ms),
        ];

        for (field, value) in positive {
            if value == 0 {
                return Err(PlaydeckError::invalid_field(
                    "interaction",
                    field,
                    "must be greater than zero",
                ));
            }
        }

        if self.seek_step_secs == 0 {
            return Err(PlaydeckError::invalid_field(
                "interaction",
                "seek_step_secs",
                "must be greater than zero",
            ));
        }

        if !(self.speed_step > 0.0 && self.speed_step <= 3.75) {
            return Err(PlaydeckError::invalid_field(
                "interaction",
                "speed_step",
                format!("{} is outside (0, 3.75]", self.speed_step),
            ));
        }

        Ok(())
    }
}
