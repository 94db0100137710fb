//! Optional platform hooks: fullscreen, picture-in-picture and
//! screen-orientation lock.
//!
//! Every hook defaults to "unsupported" so hosts only implement what they
//! have. The player checks [`Platform::capabilities`] before calling a
//! hook and treats an absent capability as a silent no-op.

/// Platform error types
pub mod error;

pub use error::PlatformError;

use async_trait::async_trait;
use bitflags::bitflags;

bitflags! {
    /// Platform features available to the player.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Fullscreen can be requested and exited.
        const FULLSCREEN = 0b0000_0001;
        /// The video can be moved to a picture-in-picture window.
        const PICTURE_IN_PICTURE = 0b0000_0010;
        /// Screen orientation can be locked.
        const ORIENTATION_LOCK = 0b0000_0100;
    }
}

/// Screen orientation to lock to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Width greater than height
    Landscape,
    /// Height greater than width
    Portrait,
}

/// Call contract of the platform fullscreen, PiP and orientation APIs.
#[async_trait]
pub trait Platform: Send {
    /// Features this platform supports.
    fn capabilities(&self) -> Capabilities {
        Capabilities::empty()
    }

    /// Enter fullscreen with the player wrapper.
    async fn request_fullscreen(&mut self) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported("fullscreen"))
    }

    /// Leave fullscreen.
    async fn exit_fullscreen(&mut self) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported("fullscreen"))
    }

    /// Whether the player wrapper is currently fullscreen.
    fn is_fullscreen(&self) -> bool {
        false
    }

    /// Move the video to a picture-in-picture window.
    async fn request_picture_in_picture(&mut self) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported("picture-in-picture"))
    }

    /// Close the picture-in-picture window.
    async fn exit_picture_in_picture(&mut self) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported("picture-in-picture"))
    }

    /// Whether the video is currently in picture-in-picture.
    fn is_picture_in_picture(&self) -> bool {
        false
    }

    /// Lock the screen orientation.
    async fn lock_orientation(&mut self, _orientation: Orientation) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported("orientation lock"))
    }

    /// Release a previous orientation lock.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Unsupported` unless the host overrides it.
    fn unlock_orientation(&mut self) -> Result<(), PlatformError> {
        Err(PlatformError::Unsupported("orientation lock"))
    }
}

/// Platform without any optional feature.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPlatform;

impl Platform for NoPlatform {}
