use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

use crate::config::AdaptiveOptions;
use crate::services::media::MediaElement;

use super::{
    RecoveryAction, SessionId, SessionPhase, SessionReporter, StreamingEngine,
    StreamingEngineFactory, StreamingError, StreamingErrorEvent, StreamingErrorKind,
};

/// One live engine instance attached to the media element.
struct StreamingSession {
    id: SessionId,
    engine: Box<dyn StreamingEngine>,
    phase: SessionPhase,
    recovery_attempts: u32,
    max_recovery_attempts: u32,
}

impl StreamingSession {
    fn attach(
        id: SessionId,
        mut engine: Box<dyn StreamingEngine>,
        url: &str,
        media: &mut dyn MediaElement,
        max_recovery_attempts: u32,
    ) -> Self {
        media.clear_source();
        engine.load_source(url);
        engine.attach_media(media);

        Self {
            id,
            engine,
            phase: SessionPhase::Attached,
            recovery_attempts: 0,
            max_recovery_attempts,
        }
    }

    fn handle_error(&mut self, event: &StreamingErrorEvent) -> RecoveryAction {
        if !event.fatal {
            debug!(
                "{} non-fatal {} error: {}",
                self.id, event.kind, event.details
            );
            return RecoveryAction::Ignored;
        }

        if event.kind == StreamingErrorKind::Other {
            error!("{} fatal {} error: {}", self.id, event.kind, event.details);
            return RecoveryAction::Terminal;
        }

        if self.recovery_attempts >= self.max_recovery_attempts {
            error!(
                "{} fatal {} error after {} recovery attempts: {}",
                self.id, event.kind, self.recovery_attempts, event.details
            );
            return RecoveryAction::Terminal;
        }

        self.recovery_attempts += 1;
        self.phase = SessionPhase::Recovering(event.kind);
        warn!(
            "{} fatal {} error, recovery attempt {}/{}: {}",
            self.id, event.kind, self.recovery_attempts, self.max_recovery_attempts, event.details
        );

        match event.kind {
            StreamingErrorKind::Network => {
                self.engine.start_load();
                RecoveryAction::RestartLoad
            }
            _ => {
                self.engine.recover_media_error();
                RecoveryAction::RecoverMedia
            }
        }
    }

    fn destroy(mut self) {
        self.engine.destroy();
    }
}

/// Exclusively owned slot holding at most one streaming session.
///
/// Creating a session destroys the previous one first, and every error
/// signal is checked against the id of the session currently held, so a
/// late signal from a replaced session never touches its successor.
pub struct SessionSlot {
    current: Option<StreamingSession>,
    next_id: u64,
    created_any: bool,
    tx: mpsc::UnboundedSender<StreamingErrorEvent>,
}

impl SessionSlot {
    /// Create an empty slot whose sessions report errors on `tx`.
    pub fn new(tx: mpsc::UnboundedSender<StreamingErrorEvent>) -> Self {
        Self {
            current: None,
            next_id: 0,
            created_any: false,
            tx,
        }
    }

    /// Replace the held session with a new one playing `url`.
    ///
    /// # Errors
    ///
    /// Returns the factory's error; the slot is then left empty.
    #[instrument(skip(self, factory, options, media))]
    pub fn attach(
        &mut self,
        factory: &mut dyn StreamingEngineFactory,
        options: &AdaptiveOptions,
        url: &str,
        media: &mut dyn MediaElement,
    ) -> Result<SessionId, StreamingError> {
        self.destroy();

        self.next_id += 1;
        let id = SessionId(self.next_id);
        let reporter = SessionReporter::new(id, self.tx.clone());
        let engine = factory.create(options, reporter)?;

        info!("Attaching {id} to {url}");
        self.current = Some(StreamingSession::attach(
            id,
            engine,
            url,
            media,
            options.max_recovery_attempts,
        ));
        self.created_any = true;

        Ok(id)
    }

    /// Destroy the held session, if any. Safe to call repeatedly.
    pub fn destroy(&mut self) -> bool {
        match self.current.take() {
            Some(session) => {
                debug!("Destroying {}", session.id);
                session.destroy();
                true
            }
            None => false,
        }
    }

    /// Id of the held session.
    pub fn session_id(&self) -> Option<SessionId> {
        self.current.as_ref().map(|s| s.id)
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        match &self.current {
            Some(session) => session.phase,
            None if self.created_any => SessionPhase::Destroyed,
            None => SessionPhase::Uninitialized,
        }
    }

    /// Apply the recovery policy to an error signal.
    ///
    /// A `Terminal` outcome has already destroyed the session.
    pub fn handle_error(&mut self, event: &StreamingErrorEvent) -> RecoveryAction {
        let Some(session) = self.current.as_mut().filter(|s| s.id == event.session) else {
            debug!("Ignoring {} error from stale {}", event.kind, event.session);
            return RecoveryAction::Ignored;
        };

        let action = session.handle_error(event);
        if action == RecoveryAction::Terminal {
            self.destroy();
        }

        action
    }

    /// Playback is flowing again: a recovering session is healthy.
    pub fn on_playing(&mut self) {
        if let Some(session) = self.current.as_mut() {
            if let SessionPhase::Recovering(kind) = session.phase {
                info!("{} recovered from {} error", session.id, kind);
                session.phase = SessionPhase::Attached;
                session.recovery_attempts = 0;
            }
        }
    }

    /// The media element reached its end: stop fetching segments but keep
    /// the session so seeking backward still works.
    pub fn on_end_of_stream(&mut self) {
        if let Some(session) = self.current.as_mut() {
            if session.phase != SessionPhase::Stopped {
                debug!("{} reached end of stream, stopping load", session.id);
                session.engine.stop_load();
                session.phase = SessionPhase::Stopped;
            }
        }
    }

    /// A seek happened: a stopped session resumes loading.
    pub fn on_seek(&mut self) {
        if let Some(session) = self.current.as_mut() {
            if session.phase == SessionPhase::Stopped {
                debug!("{} resuming load after seek", session.id);
                session.engine.start_load();
                session.phase = SessionPhase::Attached;
            }
        }
    }
}

impl Drop for SessionSlot {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;
    use crate::services::media::{MediaError, TimeRange};

    type Calls = Arc<Mutex<Vec<String>>>;

    struct RecordingEngine {
        calls: Calls,
    }

    impl StreamingEngine for RecordingEngine {
        fn load_source(&mut self, url: &str) {
            self.calls.lock().unwrap().push(format!("load_source {url}"));
        }
        fn attach_media(&mut self, _media: &mut dyn MediaElement) {
            self.calls.lock().unwrap().push("attach_media".into());
        }
        fn start_load(&mut self) {
            self.calls.lock().unwrap().push("start_load".into());
        }
        fn stop_load(&mut self) {
            self.calls.lock().unwrap().push("stop_load".into());
        }
        fn recover_media_error(&mut self) {
            self.calls.lock().unwrap().push("recover_media_error".into());
        }
        fn destroy(&mut self) {
            self.calls.lock().unwrap().push("destroy".into());
        }
    }

    struct RecordingFactory {
        calls: Calls,
    }

    impl StreamingEngineFactory for RecordingFactory {
        fn is_supported(&self) -> bool {
            true
        }

        fn create(
            &mut self,
            _options: &AdaptiveOptions,
            _reporter: SessionReporter,
        ) -> Result<Box<dyn StreamingEngine>, StreamingError> {
            Ok(Box::new(RecordingEngine {
                calls: Arc::clone(&self.calls),
            }))
        }
    }

    #[derive(Default)]
    struct NullMedia;

    #[async_trait]
    impl MediaElement for NullMedia {
        async fn play(&mut self) -> Result<(), MediaError> {
            Ok(())
        }
        async fn pause(&mut self) -> Result<(), MediaError> {
            Ok(())
        }
        fn paused(&self) -> bool {
            true
        }
        fn current_time(&self) -> f64 {
            0.0
        }
        fn set_current_time(&mut self, _time: f64) {}
        fn duration(&self) -> f64 {
            0.0
        }
        fn volume(&self) -> f64 {
            1.0
        }
        fn set_volume(&mut self, _volume: f64) {}
        fn muted(&self) -> bool {
            false
        }
        fn set_muted(&mut self, _muted: bool) {}
        fn set_playback_rate(&mut self, _rate: f64) {}
        fn buffered(&self) -> Vec<TimeRange> {
            Vec::new()
        }
        fn set_source(&mut self, _url: &str) {}
        fn clear_source(&mut self) {}
        fn supports_native_adaptive(&self) -> bool {
            false
        }
    }

    fn attached_slot() -> (SessionSlot, SessionId, Calls) {
        let (tx, _rx) = mpsc::unbounded_channel();
        let calls = Calls::default();
        let mut factory = RecordingFactory {
            calls: Arc::clone(&calls),
        };
        let mut slot = SessionSlot::new(tx);
        let id = slot
            .attach(
                &mut factory,
                &AdaptiveOptions::default(),
                "live.m3u8",
                &mut NullMedia,
            )
            .unwrap();
        calls.lock().unwrap().clear();
        (slot, id, calls)
    }

    fn fatal(session: SessionId, kind: StreamingErrorKind) -> StreamingErrorEvent {
        StreamingErrorEvent {
            session,
            fatal: true,
            kind,
            details: "boom".into(),
        }
    }

    #[test]
    fn starts_uninitialized() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut slot = SessionSlot::new(tx);

        assert_eq!(slot.phase(), SessionPhase::Uninitialized);
        assert!(!slot.destroy());
    }

    #[test]
    fn fatal_network_error_restarts_loading() {
        let (mut slot, id, calls) = attached_slot();

        let action = slot.handle_error(&fatal(id, StreamingErrorKind::Network));

        assert_eq!(action, RecoveryAction::RestartLoad);
        assert_eq!(
            slot.phase(),
            SessionPhase::Recovering(StreamingErrorKind::Network)
        );
        assert_eq!(*calls.lock().unwrap(), vec!["start_load".to_string()]);
    }

    #[test]
    fn fatal_media_error_recovers_in_place() {
        let (mut slot, id, calls) = attached_slot();

        let action = slot.handle_error(&fatal(id, StreamingErrorKind::Media));

        assert_eq!(action, RecoveryAction::RecoverMedia);
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["recover_media_error".to_string()]
        );
    }

    #[test]
    fn unknown_fatal_error_destroys_session() {
        let (mut slot, id, calls) = attached_slot();

        let action = slot.handle_error(&fatal(id, StreamingErrorKind::Other));

        assert_eq!(action, RecoveryAction::Terminal);
        assert_eq!(slot.phase(), SessionPhase::Destroyed);
        assert_eq!(*calls.lock().unwrap(), vec!["destroy".to_string()]);
    }

    #[test]
    fn non_fatal_errors_are_ignored() {
        let (mut slot, id, calls) = attached_slot();
        let mut event = fatal(id, StreamingErrorKind::Network);
        event.fatal = false;

        assert_eq!(slot.handle_error(&event), RecoveryAction::Ignored);
        assert_eq!(slot.phase(), SessionPhase::Attached);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn recovery_attempts_are_bounded() {
        let (mut slot, id, _calls) = attached_slot();
        let event = fatal(id, StreamingErrorKind::Network);

        for _ in 0..3 {
            assert_eq!(slot.handle_error(&event), RecoveryAction::RestartLoad);
        }

        assert_eq!(slot.handle_error(&event), RecoveryAction::Terminal);
        assert_eq!(slot.session_id(), None);
    }

    #[test]
    fn playing_resets_recovery_budget() {
        let (mut slot, id, _calls) = attached_slot();
        let event = fatal(id, StreamingErrorKind::Media);

        for _ in 0..3 {
            slot.handle_error(&event);
        }
        slot.on_playing();

        assert_eq!(slot.phase(), SessionPhase::Attached);
        assert_eq!(slot.handle_error(&event), RecoveryAction::RecoverMedia);
    }

    #[test]
    fn stale_session_errors_are_ignored() {
        let (mut slot, id, calls) = attached_slot();
        let stale = SessionId(id.0 + 41);

        assert_eq!(
            slot.handle_error(&fatal(stale, StreamingErrorKind::Other)),
            RecoveryAction::Ignored
        );
        assert_eq!(slot.session_id(), Some(id));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn destroy_is_idempotent() {
        let (mut slot, _id, calls) = attached_slot();

        assert!(slot.destroy());
        assert!(!slot.destroy());
        assert_eq!(*calls.lock().unwrap(), vec!["destroy".to_string()]);
    }

    #[test]
    fn end_of_stream_stops_loading_until_seek() {
        let (mut slot, _id, calls) = attached_slot();

        slot.on_end_of_stream();
        slot.on_end_of_stream();
        assert_eq!(slot.phase(), SessionPhase::Stopped);

        slot.on_seek();
        assert_eq!(slot.phase(), SessionPhase::Attached);
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["stop_load".to_string(), "start_load".to_string()]
        );
    }
}
