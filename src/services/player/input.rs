use crate::config::{AdaptiveMode, SourceConfig};
use crate::services::common::TimerTicket;
use crate::services::media::MediaEvent;

use super::{gesture::TapZone, state::SettingPanel};

/// Direction of a relative seek or speed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the start, or slower
    Backward,
    /// Toward the end, or faster
    Forward,
}

impl Direction {
    /// `-1` or `1`.
    pub fn sign(self) -> i64 {
        match self {
            Direction::Backward => -1,
            Direction::Forward => 1,
        }
    }
}

/// Keyboard shortcuts understood by pointer-class players.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Toggle play/pause
    Space,
    /// Toggle fullscreen
    F,
    /// Toggle picture-in-picture
    P,
    /// Seek backward one step
    ArrowLeft,
    /// Seek forward one step
    ArrowRight,
}

impl Key {
    /// Map a host key name (`" "`, `"f"`, `"ArrowLeft"`, ...) to a shortcut.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            " " | "Space" => Some(Key::Space),
            "f" => Some(Key::F),
            "p" => Some(Key::P),
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            _ => None,
        }
    }
}

/// Actions forwarded by the view layer.
#[derive(Debug, Clone, PartialEq)]
pub enum UserInput {
    /// Play/pause button
    TogglePlay,
    /// Mute button; unmuting at zero volume restores full volume
    ToggleMute,
    /// Volume slider moved
    SetVolume(f64),
    /// Finger dragged over the volume slider (touch devices)
    VolumeDrag {
        /// Touch offset from the left edge of the slider, in pixels
        offset: f64,
        /// Slider width in pixels
        width: f64,
    },
    /// Fullscreen button
    ToggleFullscreen,
    /// Picture-in-picture button
    TogglePictureInPicture,
    /// The host reports fullscreen was entered or left
    FullscreenChanged(bool),
    /// Progress slider set to an absolute time
    SeekTo(f64),
    /// Relative seek by one step
    Skip(Direction),
    /// Pointer moved over the progress bar
    ProgressHover {
        /// Pointer offset from the left edge of the bar, in pixels
        offset: f64,
        /// Bar width in pixels
        width: f64,
    },
    /// Pointer left the progress bar
    ProgressLeave,
    /// Finger dragged over the progress bar
    ProgressDrag {
        /// Touch offset from the left edge of the bar, in pixels
        offset: f64,
        /// Bar width in pixels
        width: f64,
    },
    /// A slider drag started
    ScrubStart,
    /// A slider drag ended
    ScrubEnd,
    /// Speed picked from the speed panel
    SetSpeed(f64),
    /// Speed step buttons
    SpeedStep(Direction),
    /// Rendition picked from the quality panel
    SelectQuality(u32),
    /// Settings button
    ToggleSettings,
    /// Entry of the settings menu
    OpenPanel(SettingPanel),
    /// Back or outside click in the settings menu
    CloseSettings,
    /// Subtitle switch
    ToggleSubtitles,
    /// Pointer moved over the player
    PointerMove,
    /// Pointer left the player
    PointerLeave,
    /// Tap on the video surface
    Tap(TapZone),
    /// Tap landed on a button or slider
    ControlTouched,
    /// Keyboard shortcut
    Key(Key),
}

/// Firings of the player's timers, tagged with the arming they belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Auto-hide delay elapsed
    Hide(TimerTicket),
    /// Seek burst expired
    SeekMode(TimerTicket),
    /// Single tap survived the debounce window
    SingleTap(TimerTicket),
    /// Trailing pointer-move call is due
    PointerThrottle(TimerTicket),
}

/// Everything the player reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerInput {
    /// Event from the media element
    Media(MediaEvent),
    /// Action from the view layer
    User(UserInput),
    /// Timer firing
    Timer(TimerEvent),
    /// Replace the source
    SetSource {
        /// New source
        source: SourceConfig,
        /// Adaptive mode for the new source
        adaptive: AdaptiveMode,
    },
    /// Tear the player down
    Unmount,
}

impl From<MediaEvent> for PlayerInput {
    fn from(event: MediaEvent) -> Self {
        PlayerInput::Media(event)
    }
}

impl From<UserInput> for PlayerInput {
    fn from(input: UserInput) -> Self {
        PlayerInput::User(input)
    }
}

impl From<TimerEvent> for PlayerInput {
    fn from(event: TimerEvent) -> Self {
        PlayerInput::Timer(event)
    }
}
