/// Playback state reducer
pub mod playback;
/// UI state reducer
pub mod ui;

pub use playback::{
    MAX_SPEED, MIN_SPEED, PlaybackEvent, PlaybackState, should_dispatch_time_update,
};
pub use ui::{HoverPosition, SettingPanel, UiEvent, UiState};
