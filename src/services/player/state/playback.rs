/// Lowest playback speed the player allows.
pub const MIN_SPEED: f64 = 0.25;
/// Highest playback speed the player allows.
pub const MAX_SPEED: f64 = 4.0;

/// Snapshot of the playback state of the current source.
///
/// Only changed through [`reduce`]. `is_ended` implies not playing, and
/// an error implies neither playing nor started.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    /// Media is playing
    pub is_playing: bool,
    /// Media reached its end (also set by a terminal error)
    pub is_ended: bool,
    /// Terminal playback error; cleared only by `Reset`
    pub is_error: bool,
    /// Waiting for data
    pub is_loading: bool,
    /// Audio muted
    pub is_muted: bool,
    /// Play was initiated at least once for the current source
    pub has_started_playing: bool,
    /// Playback position in seconds
    pub current_time: f64,
    /// Duration in seconds, `0` when unknown
    pub duration: f64,
    /// Volume in `[0, 1]`
    pub volume: f64,
    /// Speed multiplier in `[0.25, 4]`
    pub playback_speed: f64,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            is_playing: false,
            is_ended: false,
            is_error: false,
            is_loading: false,
            is_muted: false,
            has_started_playing: false,
            current_time: 0.0,
            duration: 0.0,
            volume: 1.0,
            playback_speed: 1.0,
        }
    }
}

/// Transitions of the playback state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackEvent {
    /// Playback started
    Play,
    /// Playback paused
    Pause,
    /// Playback reached the end
    End,
    /// Terminal playback error
    Error,
    /// Buffering started or stopped
    Loading(bool),
    /// Mute toggled
    Mute(bool),
    /// Position changed
    TimeUpdate(f64),
    /// Duration became known or changed
    DurationChange(f64),
    /// Volume changed
    VolumeChange(f64),
    /// Speed changed
    SpeedChange(f64),
    /// A new source replaced the current one
    Reset,
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Apply `event` to `state`.
///
/// Fields not named by the event pass through unchanged. While in error,
/// everything but `Reset` is ignored.
pub fn reduce(state: &PlaybackState, event: PlaybackEvent) -> PlaybackState {
    if state.is_error && event != PlaybackEvent::Reset {
        return state.clone();
    }

    match event {
        PlaybackEvent::Play => PlaybackState {
            is_playing: true,
            is_ended: false,
            has_started_playing: true,
            ..state.clone()
        },
        PlaybackEvent::Pause => PlaybackState {
            is_playing: false,
            ..state.clone()
        },
        PlaybackEvent::End => PlaybackState {
            is_playing: false,
            is_ended: true,
            ..state.clone()
        },
        PlaybackEvent::Error => PlaybackState {
            is_error: true,
            is_playing: false,
            is_loading: false,
            is_ended: true,
            has_started_playing: false,
            ..state.clone()
        },
        PlaybackEvent::Loading(is_loading) => PlaybackState {
            is_loading,
            ..state.clone()
        },
        PlaybackEvent::Mute(is_muted) => PlaybackState {
            is_muted,
            ..state.clone()
        },
        PlaybackEvent::TimeUpdate(time) => PlaybackState {
            current_time: non_negative(time),
            ..state.clone()
        },
        PlaybackEvent::DurationChange(duration) => PlaybackState {
            duration: non_negative(duration),
            ..state.clone()
        },
        PlaybackEvent::VolumeChange(volume) => PlaybackState {
            volume: if volume.is_finite() {
                volume.clamp(0.0, 1.0)
            } else {
                state.volume
            },
            ..state.clone()
        },
        PlaybackEvent::SpeedChange(speed) => PlaybackState {
            playback_speed: if speed.is_finite() {
                speed.clamp(MIN_SPEED, MAX_SPEED)
            } else {
                state.playback_speed
            },
            ..state.clone()
        },
        PlaybackEvent::Reset => PlaybackState {
            is_muted: state.is_muted,
            volume: state.volume,
            playback_speed: state.playback_speed,
            ..PlaybackState::default()
        },
    }
}

/// Dispatch-site filter for position updates.
///
/// Native time updates fire several times per second; only jumps of more
/// than a second or crossings of a whole-second boundary are worth a
/// state change.
pub fn should_dispatch_time_update(current: f64, new: f64) -> bool {
    (new - current).abs() > 1.0 || new.floor() != current.floor()
}
