/// Errors from optional platform APIs
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PlatformError {
    /// The platform does not provide the feature
    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),

    /// The platform rejected the request
    #[error("{operation} request rejected: {reason}")]
    Rejected {
        /// Operation that was attempted
        operation: &'static str,
        /// Reason given by the platform
        reason: String,
    },
}
