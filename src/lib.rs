//! Playdeck - Embeddable media playback control surface.
//!
//! Playdeck drives the transport controls of a video player on top of a
//! host-provided media element. It keeps two snapshots consistent with
//! the element's asynchronous events:
//!
//! - Playback state (playing, buffering, position, volume, speed, errors)
//! - UI state (control visibility, settings menu, seek bursts, hover preview)
//!
//! On top of the reducers sit the interaction timings (auto-hide, pointer
//! throttling, double-tap seeking), quality switching that preserves the
//! playback position, and recovery of adaptive streaming sessions.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use playdeck::config::PlayerConfig;
//!
//! let config = PlayerConfig::from_toml_str(r#"
//!     title = "Big Buck Bunny"
//!     source = [
//!         { src = "bbb-720.mp4", quality = 720 },
//!         { src = "bbb-480.mp4", quality = 480 },
//!     ]
//! "#).expect("valid config");
//!
//! assert_eq!(config.source.renditions()[0].quality, 720);
//! ```

/// Configuration schema definitions and validation.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Player, media element, platform and streaming services.
pub mod services;

/// Tracing subscriber setup for host applications.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use crate::core::{PlaydeckError, Result};
