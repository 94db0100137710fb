/// A contiguous range of buffered media, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeRange {
    /// Start of the range
    pub start: f64,
    /// End of the range (exclusive)
    pub end: f64,
}

impl TimeRange {
    /// Create a new range.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Whether `position` lies inside `[start, end)`.
    pub fn contains(&self, position: f64) -> bool {
        self.start <= position && position < self.end
    }
}

/// Visibility mode of the subtitle text track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTrackMode {
    /// Cues are tracked and reported, but not rendered by the element
    Hidden,
    /// Cues are neither tracked nor rendered
    Disabled,
}

/// Events emitted by the host media element.
///
/// The host forwards them in delivery order; the player applies them in
/// that same order.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// A new source started loading
    LoadStart,
    /// Metadata of the current source is available
    LoadedMetadata {
        /// Duration reported with the metadata
        duration: f64,
    },
    /// Duration changed
    DurationChange(f64),
    /// Playback position changed
    TimeUpdate(f64),
    /// Volume or mute state changed
    VolumeChange {
        /// New volume in `[0, 1]`
        volume: f64,
        /// New mute state
        muted: bool,
    },
    /// Playback rate changed
    RateChange(f64),
    /// Playback stalled waiting for data
    Waiting,
    /// Playback resumed after stalling or starting
    Playing,
    /// Enough data to start playing
    CanPlay,
    /// First frame loaded
    LoadedData,
    /// Playback was requested
    Play,
    /// Playback was paused
    Pause,
    /// Playback reached the end of the media
    Ended,
    /// A seek started
    Seeking,
    /// The element failed to load or decode the media
    Error(String),
    /// Active subtitle cue changed
    CueChange(Option<String>),
}
