//! Player orchestration: state reducers, the interaction timing layer,
//! rendition switching and the [`Player`] that ties them to a media
//! element.

/// Player orchestrator
pub mod core;
/// Tap classification and seek bursts
pub mod gesture;
/// Inputs accepted by the player
pub mod input;
/// Renditions, quality switching and streaming sessions
pub mod source;
/// Playback and UI state reducers
pub mod state;
/// Leading/trailing rate limiter
pub mod throttle;
/// Time and label formatting, device detection
pub mod utils;
/// Control auto-hide
pub mod visibility;

pub use self::core::Player;
pub use gesture::{GestureDetector, TapOutcome, TapZone};
pub use input::{Direction, Key, PlayerInput, TimerEvent, UserInput};
pub use source::{
    Delivery, ResumePoint, SourceManager, buffered_percentage, progress_percentage,
};
pub use state::{
    HoverPosition, PlaybackEvent, PlaybackState, SettingPanel, UiEvent, UiState,
};
pub use throttle::Throttle;
pub use utils::{DeviceClass, format_quality, format_time};
pub use visibility::VisibilityController;
