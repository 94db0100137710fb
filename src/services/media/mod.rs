/// Host media element trait
pub mod element;
/// Media element error types
pub mod error;
/// Buffered ranges and media events
pub mod types;

pub use element::*;
pub use error::*;
pub use types::*;
