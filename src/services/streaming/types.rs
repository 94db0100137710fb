use std::fmt;

use tokio::sync::mpsc;

/// Identifies one streaming session over the lifetime of a player.
///
/// Ids are never reused, so signals from a destroyed session can be told
/// apart from those of its replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub(crate) u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session#{}", self.0)
    }
}

/// Error taxonomy of the streaming engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamingErrorKind {
    /// Manifest or segment requests failed
    Network,
    /// Decoding or buffering failed
    Media,
    /// Anything the engine could not classify
    Other,
}

impl fmt::Display for StreamingErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamingErrorKind::Network => write!(f, "network"),
            StreamingErrorKind::Media => write!(f, "media"),
            StreamingErrorKind::Other => write!(f, "other"),
        }
    }
}

/// Error signal raised by a streaming engine.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamingErrorEvent {
    /// Session that raised the error
    pub session: SessionId,
    /// Whether the engine gave up on its own
    pub fatal: bool,
    /// Error class
    pub kind: StreamingErrorKind,
    /// Engine-provided description
    pub details: String,
}

/// Lifecycle phase of the streaming session slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No session was ever created
    Uninitialized,
    /// Engine loaded the source and is attached to the media element
    Attached,
    /// A fatal error is being recovered from
    Recovering(StreamingErrorKind),
    /// Segment loading halted at end of stream; the session is kept
    Stopped,
    /// The last session was torn down
    Destroyed,
}

/// What the session did about an error signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Non-fatal, or from a stale session: nothing to do
    Ignored,
    /// Loading was restarted after a network failure
    RestartLoad,
    /// In-place media error recovery was attempted
    RecoverMedia,
    /// The session was destroyed; playback cannot continue
    Terminal,
}

/// Handed to an engine at creation so it can raise error signals.
///
/// Every signal is tagged with the session the reporter was created for.
#[derive(Debug, Clone)]
pub struct SessionReporter {
    session: SessionId,
    tx: mpsc::UnboundedSender<StreamingErrorEvent>,
}

impl SessionReporter {
    pub(crate) fn new(session: SessionId, tx: mpsc::UnboundedSender<StreamingErrorEvent>) -> Self {
        Self { session, tx }
    }

    /// Session this reporter belongs to.
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Raise an error signal. Signals sent after the player is gone are dropped.
    pub fn report(&self, fatal: bool, kind: StreamingErrorKind, details: impl Into<String>) {
        let _ = self.tx.send(StreamingErrorEvent {
            session: self.session,
            fatal,
            kind,
            details: details.into(),
        });
    }
}
