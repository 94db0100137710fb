/// Errors that can occur while setting up a streaming session
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum StreamingError {
    /// The engine cannot run in this environment
    #[error("Streaming engine is not supported here")]
    Unsupported,

    /// The engine failed to initialize
    #[error("Failed to create streaming session: {0}")]
    InitializationFailed(String),
}
