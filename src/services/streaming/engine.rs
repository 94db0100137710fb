use crate::config::AdaptiveOptions;
use crate::services::media::MediaElement;

use super::{SessionReporter, StreamingError};

/// Call contract of an external adaptive streaming engine instance.
///
/// The engine's ABR and segment loading are its own business; the player
/// only drives its lifecycle and reacts to the errors it reports through
/// the [`SessionReporter`] it was created with.
pub trait StreamingEngine: Send {
    /// Start loading the manifest at `url`.
    fn load_source(&mut self, url: &str);

    /// Bind the engine to the media element it feeds.
    fn attach_media(&mut self, media: &mut dyn MediaElement);

    /// (Re)start segment loading.
    fn start_load(&mut self);

    /// Stop segment loading, keeping buffered data and the attachment.
    fn stop_load(&mut self);

    /// Attempt in-place recovery from a decode-level error.
    fn recover_media_error(&mut self);

    /// Release every engine resource. Called at most once per instance.
    fn destroy(&mut self);
}

/// Creates engine instances for the player.
pub trait StreamingEngineFactory: Send {
    /// Whether the engine can run in this environment at all.
    fn is_supported(&self) -> bool;

    /// Create a new engine instance.
    ///
    /// # Errors
    ///
    /// Returns `StreamingError::InitializationFailed` if the engine could
    /// not be constructed.
    fn create(
        &mut self,
        options: &AdaptiveOptions,
        reporter: SessionReporter,
    ) -> Result<Box<dyn StreamingEngine>, StreamingError>;
}

/// Factory for hosts without a streaming engine.
///
/// Adaptive sources then fall back to the media element.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoStreamingEngine;

impl StreamingEngineFactory for NoStreamingEngine {
    fn is_supported(&self) -> bool {
        false
    }

    fn create(
        &mut self,
        _options: &AdaptiveOptions,
        _reporter: SessionReporter,
    ) -> Result<Box<dyn StreamingEngine>, StreamingError> {
        Err(StreamingError::Unsupported)
    }
}
