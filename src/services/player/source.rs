use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::config::{AdaptiveMode, Rendition, SourceConfig};
use crate::services::media::{MediaElement, TimeRange};
use crate::services::streaming::{
    RecoveryAction, SessionPhase, SessionSlot, StreamingEngineFactory, StreamingErrorEvent,
};

use super::utils::{format_quality, percentage};

/// Position to restore once the next source has loaded its metadata.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResumePoint {
    /// Playback position in seconds
    pub time: f64,
    /// Whether playback was running when the switch started
    pub was_playing: bool,
}

/// How the active rendition is being delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The media element plays the URL itself
    Native,
    /// A streaming session feeds the media element
    Streaming,
}

/// Rendition list, active quality and streaming session of a player.
///
/// The rendition list is sorted by descending quality once, when the
/// source is set, and never reordered.
pub struct SourceManager {
    renditions: Vec<Rendition>,
    active: usize,
    resume: Option<ResumePoint>,
    adaptive: AdaptiveMode,
    factory: Box<dyn StreamingEngineFactory>,
    sessions: SessionSlot,
}

impl SourceManager {
    /// Create a manager for `source`. Nothing is loaded until
    /// [`SourceManager::load`].
    pub fn new(
        source: &SourceConfig,
        adaptive: AdaptiveMode,
        factory: Box<dyn StreamingEngineFactory>,
        errors: mpsc::UnboundedSender<StreamingErrorEvent>,
    ) -> Self {
        Self {
            renditions: source.renditions(),
            active: 0,
            resume: None,
            adaptive,
            factory,
            sessions: SessionSlot::new(errors),
        }
    }

    /// Renditions, highest quality first.
    pub fn renditions(&self) -> &[Rendition] {
        &self.renditions
    }

    /// The rendition currently loaded.
    pub fn active(&self) -> Option<&Rendition> {
        self.renditions.get(self.active)
    }

    /// Quality of the active rendition, `0` for auto.
    pub fn active_quality(&self) -> u32 {
        self.active().map_or(0, |r| r.quality)
    }

    /// Label of the active rendition, e.g. `720p`.
    pub fn quality_label(&self) -> String {
        format_quality(self.active_quality())
    }

    /// Lifecycle phase of the streaming session slot.
    pub fn session_phase(&self) -> SessionPhase {
        self.sessions.phase()
    }

    /// Load the active rendition into `media`.
    ///
    /// Adaptive sources go through a streaming session when the element
    /// cannot play them natively and an engine is available; everything
    /// else, including a failed session setup, is handed to the element.
    #[instrument(skip(self, media))]
    pub fn load(&mut self, media: &mut dyn MediaElement) -> Delivery {
        let Some(url) = self.active().map(|r| r.src.clone()) else {
            warn!("No rendition to load");
            return Delivery::Native;
        };

        if let Some(options) = self.adaptive.options() {
            if media.supports_native_adaptive() {
                debug!("Media element plays adaptive sources natively");
            } else if !self.factory.is_supported() {
                debug!("Streaming engine unavailable, playing natively");
            } else {
                match self
                    .sessions
                    .attach(self.factory.as_mut(), &options, &url, media)
                {
                    Ok(_) => return Delivery::Streaming,
                    Err(e) => warn!(error = %e, "Cannot start streaming session, playing natively"),
                }
            }
        }

        self.sessions.destroy();
        media.set_source(&url);
        Delivery::Native
    }

    /// Switch to the rendition with `quality`, keeping the position.
    ///
    /// Returns `false` without touching anything when no rendition has
    /// that quality or it is already active.
    #[instrument(skip(self, media))]
    pub fn switch_quality(&mut self, quality: u32, media: &mut dyn MediaElement) -> bool {
        let Some(index) = self.renditions.iter().position(|r| r.quality == quality) else {
            debug!("No rendition with quality {quality}");
            return false;
        };
        if index == self.active {
            return false;
        }

        let resume = ResumePoint {
            time: media.current_time(),
            was_playing: !media.paused(),
        };
        info!(
            "Switching quality {} -> {} at {:.1}s",
            self.quality_label(),
            format_quality(quality),
            resume.time
        );

        self.resume = Some(resume);
        self.active = index;
        self.load(media);
        true
    }

    /// Replace the whole source, dropping any pending resume point.
    pub fn replace(
        &mut self,
        source: &SourceConfig,
        adaptive: AdaptiveMode,
        media: &mut dyn MediaElement,
    ) -> Delivery {
        self.sessions.destroy();
        self.renditions = source.renditions();
        self.active = 0;
        self.resume = None;
        self.adaptive = adaptive;
        self.load(media)
    }

    /// Resume point of a finished quality switch, consumed once.
    pub fn take_resume(&mut self) -> Option<ResumePoint> {
        self.resume.take()
    }

    /// Route a streaming error to the session slot.
    pub fn handle_streaming_error(&mut self, event: &StreamingErrorEvent) -> RecoveryAction {
        self.sessions.handle_error(event)
    }

    /// Playback is flowing.
    pub fn on_playing(&mut self) {
        self.sessions.on_playing();
    }

    /// The media element reached its end.
    pub fn on_end_of_stream(&mut self) {
        self.sessions.on_end_of_stream();
    }

    /// The media element started seeking.
    pub fn on_seek(&mut self) {
        self.sessions.on_seek();
    }

    /// Stop loading after a terminal error: destroys the session and
    /// drops any pending resume point. Only a new source restarts loading.
    pub fn halt(&mut self) {
        self.sessions.destroy();
        self.resume = None;
    }

    /// Tear down the streaming session. Safe to call repeatedly.
    pub fn unmount(&mut self) {
        self.sessions.destroy();
    }
}

/// Percentage of the media buffered ahead of `current_time`.
///
/// Uses the end of the range containing `current_time`; `0` when the
/// duration is unknown or the position is not buffered.
pub fn buffered_percentage(ranges: &[TimeRange], current_time: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return 0.0;
    }

    ranges
        .iter()
        .find(|range| range.contains(current_time))
        .map_or(0.0, |range| percentage(range.end, duration))
}

/// Played percentage of the media.
pub fn progress_percentage(current_time: f64, duration: f64) -> f64 {
    percentage(current_time, duration)
}
