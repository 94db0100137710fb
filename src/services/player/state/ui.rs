/// Panel shown inside the settings menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingPanel {
    /// Main settings list
    #[default]
    None,
    /// Playback speed slider
    Speed,
    /// Rendition picker
    Quality,
    /// Subtitle toggle
    Subtitle,
}

/// Pointer position over the progress bar and the time under it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverPosition {
    /// Offset from the left edge of the bar, in pixels
    pub pixel_offset: f64,
    /// Media time at that offset, in seconds
    pub time: f64,
}

/// Snapshot of the interaction state of the controls.
///
/// Only changed through [`reduce`]. An open panel implies open settings.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    /// Controls are shown
    pub is_controls_visible: bool,
    /// Player wrapper is fullscreen
    pub is_fullscreen: bool,
    /// A slider is being dragged, or a menu holds the controls open
    pub is_scrubbing: bool,
    /// Settings menu is open
    pub is_settings_open: bool,
    /// Panel shown in the settings menu
    pub active_setting_panel: SettingPanel,
    /// Cumulative pending seek shown during a seek burst, in seconds
    pub seek_stack: i64,
    /// A burst of seek gestures is underway
    pub is_seek_gesture_active: bool,
    /// Hover preview over the progress bar
    pub hover: Option<HoverPosition>,
    /// Subtitles are shown
    pub is_subtitles_enabled: bool,
    /// Text of the active subtitle cue
    pub subtitle_text: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            is_controls_visible: true,
            is_fullscreen: false,
            is_scrubbing: false,
            is_settings_open: false,
            active_setting_panel: SettingPanel::None,
            seek_stack: 0,
            is_seek_gesture_active: false,
            hover: None,
            is_subtitles_enabled: true,
            subtitle_text: None,
        }
    }
}

/// Transitions of the UI state.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Show or hide the controls
    SetControlsVisible(bool),
    /// Fullscreen entered or left
    SetFullscreen(bool),
    /// Slider drag started or ended
    SetScrubbing(bool),
    /// Open or close the settings menu
    ToggleSettings,
    /// Open the settings menu on a panel
    OpenPanel(SettingPanel),
    /// Close the settings menu
    CloseSettings,
    /// Update or clear the progress hover preview
    SetHover(Option<HoverPosition>),
    /// Accumulate a seek gesture
    AddSeek(i64),
    /// Clear the seek stack
    ResetSeek,
    /// Seek burst started or expired
    SetSeekGestureActive(bool),
    /// Subtitles turned on or off
    SetSubtitlesEnabled(bool),
    /// Active subtitle cue changed
    SetSubtitleText(Option<String>),
}

/// Seek-stack accumulation: same direction adds up, a direction change
/// starts over from `amount`.
fn accumulate_seek(stack: i64, amount: i64) -> i64 {
    if stack != 0 && stack.signum() == amount.signum() {
        stack.saturating_add(amount)
    } else {
        amount
    }
}

fn closed_settings(state: &UiState) -> UiState {
    UiState {
        is_settings_open: false,
        is_scrubbing: false,
        active_setting_panel: SettingPanel::None,
        ..state.clone()
    }
}

/// Apply `event` to `state`.
pub fn reduce(state: &UiState, event: UiEvent) -> UiState {
    match event {
        UiEvent::SetControlsVisible(is_controls_visible) => UiState {
            is_controls_visible,
            ..state.clone()
        },
        UiEvent::SetFullscreen(is_fullscreen) => UiState {
            is_fullscreen,
            ..state.clone()
        },
        UiEvent::SetScrubbing(is_scrubbing) => UiState {
            is_scrubbing,
            ..state.clone()
        },
        UiEvent::ToggleSettings if state.is_settings_open => closed_settings(state),
        UiEvent::ToggleSettings => UiState {
            is_settings_open: true,
            is_scrubbing: true,
            ..state.clone()
        },
        UiEvent::OpenPanel(active_setting_panel) => UiState {
            is_settings_open: true,
            is_scrubbing: true,
            active_setting_panel,
            ..state.clone()
        },
        UiEvent::CloseSettings => closed_settings(state),
        UiEvent::SetHover(hover) => UiState {
            hover,
            ..state.clone()
        },
        UiEvent::AddSeek(amount) => UiState {
            seek_stack: accumulate_seek(state.seek_stack, amount),
            ..state.clone()
        },
        UiEvent::ResetSeek => UiState {
            seek_stack: 0,
            ..state.clone()
        },
        UiEvent::SetSeekGestureActive(is_seek_gesture_active) => UiState {
            is_seek_gesture_active,
            ..state.clone()
        },
        UiEvent::SetSubtitlesEnabled(is_subtitles_enabled) => UiState {
            is_subtitles_enabled,
            subtitle_text: if is_subtitles_enabled {
                state.subtitle_text.clone()
            } else {
                None
            },
            ..state.clone()
        },
        UiEvent::SetSubtitleText(text) => UiState {
            subtitle_text: if state.is_subtitles_enabled { text } else { None },
            ..state.clone()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(events: impl IntoIterator<Item = UiEvent>) -> UiState {
        events
            .into_iter()
            .fold(UiState::default(), |state, event| reduce(&state, event))
    }

    #[test]
    fn same_direction_seeks_accumulate() {
        let state = apply([
            UiEvent::AddSeek(10),
            UiEvent::AddSeek(10),
            UiEvent::AddSeek(10),
        ]);
        assert_eq!(state.seek_stack, 30);

        let state = apply([UiEvent::AddSeek(-10), UiEvent::AddSeek(-10)]);
        assert_eq!(state.seek_stack, -20);
    }

    #[test]
    fn direction_change_restarts_the_stack() {
        let state = apply([
            UiEvent::AddSeek(10),
            UiEvent::AddSeek(10),
            UiEvent::AddSeek(-10),
        ]);
        assert_eq!(state.seek_stack, -10);

        let state = reduce(&state, UiEvent::AddSeek(10));
        assert_eq!(state.seek_stack, 10);
    }

    #[test]
    fn stack_matches_same_sign_sum_since_last_flip() {
        let amounts = [10, 10, -10, -10, -10, 10, 10, -10];
        let mut state = UiState::default();
        let mut expected = 0i64;

        for amount in amounts {
            state = reduce(&state, UiEvent::AddSeek(amount));
            expected = if expected != 0 && expected.signum() == amount.signum() {
                expected + amount
            } else {
                amount
            };
            assert_eq!(state.seek_stack, expected);
        }
    }

    #[test]
    fn reset_seek_always_zeroes() {
        for start in [-40, 0, 30] {
            let state = UiState {
                seek_stack: start,
                ..UiState::default()
            };
            assert_eq!(reduce(&state, UiEvent::ResetSeek).seek_stack, 0);
        }
    }

    #[test]
    fn opening_settings_suppresses_auto_hide() {
        let state = apply([UiEvent::ToggleSettings]);

        assert!(state.is_settings_open);
        assert!(state.is_scrubbing);
    }

    #[test]
    fn closing_settings_clears_panel() {
        let state = apply([
            UiEvent::OpenPanel(SettingPanel::Quality),
            UiEvent::ToggleSettings,
        ]);

        assert!(!state.is_settings_open);
        assert!(!state.is_scrubbing);
        assert_eq!(state.active_setting_panel, SettingPanel::None);
    }

    #[test]
    fn open_panel_keeps_settings_open() {
        let state = apply([UiEvent::OpenPanel(SettingPanel::Speed)]);

        assert!(state.is_settings_open);
        assert_eq!(state.active_setting_panel, SettingPanel::Speed);
    }

    #[test]
    fn disabled_subtitles_drop_cue_text() {
        let state = apply([UiEvent::SetSubtitleText(Some("Hello".into()))]);
        assert_eq!(state.subtitle_text.as_deref(), Some("Hello"));

        let state = reduce(&state, UiEvent::SetSubtitlesEnabled(false));
        assert_eq!(state.subtitle_text, None);

        let state = reduce(&state, UiEvent::SetSubtitleText(Some("World".into())));
        assert_eq!(state.subtitle_text, None);
    }
}
