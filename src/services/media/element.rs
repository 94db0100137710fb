use async_trait::async_trait;

use super::{MediaError, TextTrackMode, TimeRange};

/// Contract of the host media element driven by the player.
///
/// Setters are synchronous and take effect immediately from the player's
/// point of view; the element confirms them later through
/// [`MediaEvent`](super::MediaEvent)s. Only `play` and `pause` may be
/// rejected asynchronously.
#[async_trait]
pub trait MediaElement: Send {
    /// Request playback. May be rejected, e.g. by autoplay restrictions.
    async fn play(&mut self) -> Result<(), MediaError>;

    /// Request a pause.
    async fn pause(&mut self) -> Result<(), MediaError>;

    /// Whether the element is currently paused.
    fn paused(&self) -> bool;

    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    /// Seek to `time` seconds.
    fn set_current_time(&mut self, time: f64);

    /// Media duration in seconds, `0` or non-finite when unknown.
    fn duration(&self) -> f64;

    /// Volume in `[0, 1]`.
    fn volume(&self) -> f64;

    /// Set the volume in `[0, 1]`.
    fn set_volume(&mut self, volume: f64);

    /// Whether audio is muted.
    fn muted(&self) -> bool;

    /// Mute or unmute audio.
    fn set_muted(&mut self, muted: bool);

    /// Set the playback rate multiplier.
    fn set_playback_rate(&mut self, rate: f64);

    /// Buffered ranges, in chronological order.
    fn buffered(&self) -> Vec<TimeRange>;

    /// Point the element at a new source URL and start loading it.
    fn set_source(&mut self, url: &str);

    /// Detach the current source, e.g. before a streaming engine takes over.
    fn clear_source(&mut self);

    /// Whether the element can play adaptive manifests on its own.
    fn supports_native_adaptive(&self) -> bool;

    /// Intrinsic video size as `(width, height)`, `(0, 0)` when unknown.
    fn video_size(&self) -> (u32, u32) {
        (0, 0)
    }

    /// Set the mode of the subtitle text track, if any.
    fn set_text_track_mode(&mut self, _mode: TextTrackMode) {}
}
