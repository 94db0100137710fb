//! Common utilities shared by the player services

/// Reactive property system for publishing state snapshots
pub mod property;
/// Cancelable one-shot timers
pub(crate) mod timer;

pub use property::Property;
pub use timer::TimerTicket;
pub(crate) use timer::Timer;
