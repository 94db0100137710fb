//! Adaptive streaming session adapter.
//!
//! Wraps the lifecycle of an external streaming engine and turns its
//! error signals into recovery actions or a terminal failure.

/// Engine and factory traits
pub mod engine;
/// Session setup error types
pub mod error;
/// Session slot and recovery policy
pub mod session;
/// Session ids, phases and error signals
pub mod types;

pub use engine::*;
pub use error::*;
pub use session::*;
pub use types::*;
