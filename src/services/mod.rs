/// Shared reactive property and timer primitives
pub mod common;
/// Host media element contract
pub mod media;
/// Optional platform hooks
pub mod platform;
/// Player orchestration
pub mod player;
/// Adaptive streaming session adapter
pub mod streaming;

pub use common::{Property, TimerTicket};
pub use media::{MediaElement, MediaError, MediaEvent};
pub use platform::{Capabilities, NoPlatform, Platform, PlatformError};
pub use player::{Player, PlayerInput, UserInput};
pub use streaming::{NoStreamingEngine, StreamingEngine, StreamingEngineFactory};
