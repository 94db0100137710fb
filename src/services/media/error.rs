/// Errors reported by the host media element
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MediaError {
    /// The element refused to start playback, e.g. autoplay restrictions
    #[error("Play request rejected: {0}")]
    PlayRejected(String),

    /// The element refused to pause
    #[error("Pause request rejected: {0}")]
    PauseRejected(String),

    /// The element does not support the requested operation
    #[error("Operation not supported: {0}")]
    OperationNotSupported(String),

    /// The element is gone (unmounted by the host)
    #[error("Media element is detached")]
    Detached,
}
