use tokio::sync::mpsc;
use tracing::{debug, info, instrument, trace, warn};

use crate::config::{AdaptiveMode, PlayerConfig, Rendition, SourceConfig};
use crate::services::common::Property;
use crate::services::media::{MediaElement, MediaEvent, TextTrackMode};
use crate::services::platform::{Capabilities, Orientation, Platform, PlatformError};
use crate::services::streaming::{
    RecoveryAction, SessionPhase, StreamingEngineFactory, StreamingErrorEvent,
};
use crate::Result;

use super::gesture::{GestureDetector, TapOutcome, TapZone};
use super::input::{Direction, Key, PlayerInput, TimerEvent, UserInput};
use super::source::{self, SourceManager};
use super::state::{
    self, HoverPosition, MAX_SPEED, MIN_SPEED, PlaybackEvent, PlaybackState, UiEvent, UiState,
    should_dispatch_time_update,
};
use super::throttle::Throttle;
use super::utils::{DeviceClass, format_time, pointer_fraction};
use super::visibility::VisibilityController;

/// Media player control surface.
///
/// Owns the media element, the platform hooks and the streaming session,
/// and keeps the playback and UI snapshots consistent with them. All
/// inputs go through [`Player::dispatch`] on a single task; timers and
/// the streaming engine post back into the player's own channels, which
/// [`Player::step`] and [`Player::run`] drain. Timers are Tokio tasks,
/// so inputs must be dispatched from within a Tokio runtime.
pub struct Player {
    /// Playback state of the current source
    pub playback: Property<PlaybackState>,
    /// Interaction state of the controls
    pub ui: Property<UiState>,

    config: PlayerConfig,
    device: DeviceClass,
    media: Box<dyn MediaElement>,
    platform: Box<dyn Platform>,
    source: SourceManager,
    visibility: VisibilityController,
    pointer_throttle: Throttle,
    gestures: GestureDetector,
    tx: mpsc::UnboundedSender<PlayerInput>,
    rx: mpsc::UnboundedReceiver<PlayerInput>,
    streaming_rx: mpsc::UnboundedReceiver<StreamingErrorEvent>,
    unmounted: bool,
}

impl Player {
    /// Create a player and start loading the configured source.
    ///
    /// # Errors
    ///
    /// Returns `PlaydeckError::InvalidConfigField` if the configuration
    /// does not validate.
    #[instrument(skip_all)]
    pub fn new(
        config: PlayerConfig,
        mut media: Box<dyn MediaElement>,
        platform: Box<dyn Platform>,
        factory: Box<dyn StreamingEngineFactory>,
    ) -> Result<Self> {
        config.validate()?;

        let (tx, rx) = mpsc::unbounded_channel();
        let (streaming_tx, streaming_rx) = mpsc::unbounded_channel();

        let mut source =
            SourceManager::new(&config.source, config.adaptive.clone(), factory, streaming_tx);
        let delivery = source.load(media.as_mut());

        let device = config.device.unwrap_or_default();
        info!(
            ?delivery,
            ?device,
            quality = %source.quality_label(),
            "Player created"
        );

        let playback = [
            PlaybackEvent::VolumeChange(media.volume()),
            PlaybackEvent::Mute(media.muted()),
        ]
        .into_iter()
        .fold(PlaybackState::default(), |state, event| {
            state::playback::reduce(&state, event)
        });

        Ok(Self {
            playback: Property::new(playback),
            ui: Property::new(UiState::default()),
            device,
            media,
            platform,
            source,
            visibility: VisibilityController::new(&config.interaction),
            pointer_throttle: Throttle::new(config.interaction.pointer_throttle()),
            gestures: GestureDetector::new(&config.interaction),
            config,
            tx,
            rx,
            streaming_rx,
            unmounted: false,
        })
    }

    /// Sender for feeding inputs from other tasks.
    pub fn handle(&self) -> mpsc::UnboundedSender<PlayerInput> {
        self.tx.clone()
    }

    /// Title shown by the view layer.
    pub fn title(&self) -> Option<&str> {
        self.config.title.as_deref()
    }

    /// Poster shown before playback starts.
    pub fn poster(&self) -> Option<&str> {
        self.config.poster.as_deref()
    }

    /// Device class the player interacts with.
    pub fn device(&self) -> DeviceClass {
        self.device
    }

    /// Renditions of the current source, highest quality first.
    pub fn renditions(&self) -> &[Rendition] {
        self.source.renditions()
    }

    /// Quality of the active rendition, `0` for auto.
    pub fn active_quality(&self) -> u32 {
        self.source.active_quality()
    }

    /// Label of the active rendition.
    pub fn quality_label(&self) -> String {
        self.source.quality_label()
    }

    /// Lifecycle phase of the streaming session.
    pub fn session_phase(&self) -> SessionPhase {
        self.source.session_phase()
    }

    /// Buffered percentage ahead of the current position.
    pub fn buffered_percentage(&self) -> f64 {
        let (current, duration) = self.playback.with(|s| (s.current_time, s.duration));
        source::buffered_percentage(&self.media.buffered(), current, duration)
    }

    /// Played percentage.
    pub fn progress_percentage(&self) -> f64 {
        self.playback
            .with(|s| source::progress_percentage(s.current_time, s.duration))
    }

    /// `current / duration` formatted as `mm:ss`.
    pub fn time_labels(&self) -> (String, String) {
        self.playback
            .with(|s| (format_time(s.current_time), format_time(s.duration)))
    }

    /// Whether [`Player::unmount`] ran.
    pub fn is_unmounted(&self) -> bool {
        self.unmounted
    }

    /// Wait for the next queued input or streaming error and handle it.
    ///
    /// Returns `false` once the player is unmounted.
    pub async fn step(&mut self) -> bool {
        if self.unmounted {
            return false;
        }

        tokio::select! {
            Some(event) = self.streaming_rx.recv() => self.on_streaming_error(event),
            Some(input) = self.rx.recv() => self.dispatch(input).await,
            else => return false,
        }

        !self.unmounted
    }

    /// Handle everything already queued without waiting.
    ///
    /// Returns how many inputs were handled.
    pub async fn process_pending(&mut self) -> usize {
        let mut handled = 0;

        loop {
            if let Ok(event) = self.streaming_rx.try_recv() {
                self.on_streaming_error(event);
            } else if let Ok(input) = self.rx.try_recv() {
                self.dispatch(input).await;
            } else {
                break;
            }
            handled += 1;
        }

        handled
    }

    /// Drive the player until it is unmounted.
    pub async fn run(mut self) {
        while self.step().await {}
        debug!("Player loop finished");
    }

    /// Handle one input.
    pub async fn dispatch(&mut self, input: impl Into<PlayerInput>) {
        let input = input.into();
        if self.unmounted {
            debug!(?input, "Player unmounted, dropping input");
            return;
        }
        trace!(?input, "dispatch");

        match input {
            PlayerInput::Media(event) => self.on_media_event(event).await,
            PlayerInput::User(input) => self.on_user_input(input).await,
            PlayerInput::Timer(event) => self.on_timer(event),
            PlayerInput::SetSource { source, adaptive } => {
                if let Err(e) = self.set_source(source, adaptive) {
                    warn!(error = %e, "Rejected new source");
                }
            }
            PlayerInput::Unmount => self.unmount(),
        }
    }

    /// Replace the source: tears down the streaming session, resets the
    /// playback state and loads the new renditions.
    ///
    /// # Errors
    ///
    /// Returns `PlaydeckError::InvalidConfigField` if `source` is invalid;
    /// the current source then keeps playing.
    #[instrument(skip(self))]
    pub fn set_source(&mut self, source: SourceConfig, adaptive: AdaptiveMode) -> Result<()> {
        source.validate()?;
        if self.unmounted {
            debug!("Player unmounted, ignoring new source");
            return Ok(());
        }

        self.visibility.cancel();
        self.pointer_throttle.cancel();
        self.gestures.cancel();

        self.apply_playback(PlaybackEvent::Reset);
        for event in [
            UiEvent::ResetSeek,
            UiEvent::SetSeekGestureActive(false),
            UiEvent::SetHover(None),
            UiEvent::SetSubtitleText(None),
            UiEvent::SetControlsVisible(true),
        ] {
            self.apply_ui(event);
        }

        let delivery = self
            .source
            .replace(&source, adaptive.clone(), self.media.as_mut());
        info!(?delivery, quality = %self.source.quality_label(), "Source replaced");

        self.config.source = source;
        self.config.adaptive = adaptive;
        Ok(())
    }

    /// Cancel every timer and destroy the streaming session. Further
    /// inputs are dropped.
    #[instrument(skip(self))]
    pub fn unmount(&mut self) {
        if self.unmounted {
            return;
        }

        self.visibility.cancel();
        self.pointer_throttle.cancel();
        self.gestures.cancel();
        self.source.unmount();
        self.unmounted = true;
        info!("Player unmounted");
    }

    fn apply_playback(&self, event: PlaybackEvent) {
        let next = self
            .playback
            .with(|current| state::playback::reduce(current, event));
        self.playback.set(next);
    }

    fn apply_ui(&self, event: UiEvent) {
        let next = self.ui.with(|current| state::ui::reduce(current, event));
        self.ui.set(next);
    }

    fn is_error(&self) -> bool {
        self.playback.with(|s| s.is_error)
    }

    /// Controls only auto-show and auto-hide once playback has started,
    /// and never in error.
    fn can_toggle_controls(&self) -> bool {
        self.playback
            .with(|s| s.has_started_playing && !s.is_error)
    }

    /// Whether gestures of `class` are handled at all.
    fn accepts(&self, class: DeviceClass) -> bool {
        self.device == class && !self.is_error()
    }

    fn show_controls(&mut self) {
        if !self.can_toggle_controls() {
            return;
        }
        let ui = self.ui.get();
        let event = self.visibility.show(&ui, &self.tx);
        self.apply_ui(event);
    }

    fn hide_controls(&mut self) {
        if !self.can_toggle_controls() {
            return;
        }
        let event = self.visibility.hide();
        self.apply_ui(event);
    }

    fn toggle_controls(&mut self) {
        if self.ui.with(|ui| ui.is_controls_visible) {
            self.hide_controls();
        } else {
            self.show_controls();
        }
    }

    fn fail(&mut self) {
        self.apply_playback(PlaybackEvent::Error);
        self.source.halt();
        self.visibility.cancel();
        self.apply_ui(UiEvent::SetControlsVisible(true));
    }

    async fn play(&mut self) {
        if let Err(e) = self.media.play().await {
            warn!(error = %e, "Play request failed");
        }
    }

    async fn pause(&mut self) {
        if let Err(e) = self.media.pause().await {
            warn!(error = %e, "Pause request failed");
        }
    }

    async fn on_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::LoadStart | MediaEvent::Waiting => {
                self.apply_playback(PlaybackEvent::Loading(true));
            }
            MediaEvent::LoadedMetadata { duration } => {
                self.apply_playback(PlaybackEvent::DurationChange(duration));
                self.sync_text_track();

                if let Some(resume) = self.source.take_resume() {
                    debug!(
                        "Resuming at {:.1}s, playing: {}",
                        resume.time, resume.was_playing
                    );
                    self.media.set_current_time(resume.time);
                    self.apply_playback(PlaybackEvent::TimeUpdate(resume.time));
                    if resume.was_playing {
                        self.play().await;
                    }
                }
            }
            MediaEvent::DurationChange(duration) => {
                self.apply_playback(PlaybackEvent::DurationChange(duration));
            }
            MediaEvent::TimeUpdate(time) => {
                let current = self.playback.with(|s| s.current_time);
                if should_dispatch_time_update(current, time) {
                    self.apply_playback(PlaybackEvent::TimeUpdate(time));
                }
            }
            MediaEvent::VolumeChange { volume, muted } => {
                self.apply_playback(PlaybackEvent::VolumeChange(volume));
                self.apply_playback(PlaybackEvent::Mute(muted));
            }
            MediaEvent::RateChange(rate) => self.apply_playback(PlaybackEvent::SpeedChange(rate)),
            MediaEvent::Playing => {
                self.apply_playback(PlaybackEvent::Loading(false));
                self.source.on_playing();
            }
            MediaEvent::CanPlay | MediaEvent::LoadedData => {
                self.apply_playback(PlaybackEvent::Loading(false));
            }
            MediaEvent::Play => {
                self.apply_playback(PlaybackEvent::Play);
                self.show_controls();
            }
            MediaEvent::Pause => self.apply_playback(PlaybackEvent::Pause),
            MediaEvent::Ended => {
                self.apply_playback(PlaybackEvent::End);
                self.source.on_end_of_stream();
            }
            MediaEvent::Seeking => self.source.on_seek(),
            MediaEvent::Error(details) => {
                warn!("Media element error: {details}");
                self.fail();
            }
            MediaEvent::CueChange(text) => self.apply_ui(UiEvent::SetSubtitleText(text)),
        }
    }

    async fn on_user_input(&mut self, input: UserInput) {
        match input {
            UserInput::TogglePlay => self.toggle_play().await,
            UserInput::ToggleMute => self.toggle_mute(),
            UserInput::SetVolume(volume) => self.set_volume(volume),
            UserInput::VolumeDrag { offset, width } => {
                if self.device.is_touch() {
                    self.show_controls();
                    self.set_volume(pointer_fraction(offset, width));
                }
            }
            UserInput::ToggleFullscreen => self.toggle_fullscreen().await,
            UserInput::TogglePictureInPicture => self.toggle_picture_in_picture().await,
            UserInput::FullscreenChanged(active) => self.on_fullscreen_changed(active).await,
            UserInput::SeekTo(time) => self.seek_to(time),
            UserInput::Skip(direction) => self.skip(direction),
            UserInput::ProgressHover { offset, width } => {
                self.hover_progress(offset, width);
            }
            UserInput::ProgressLeave => self.apply_ui(UiEvent::SetHover(None)),
            UserInput::ProgressDrag { offset, width } => {
                let time = self.hover_progress(offset, width);
                self.seek_to(time);
            }
            UserInput::ScrubStart => self.apply_ui(UiEvent::SetScrubbing(true)),
            UserInput::ScrubEnd => {
                self.apply_ui(UiEvent::SetScrubbing(false));
                self.show_controls();
            }
            UserInput::SetSpeed(speed) => self.set_speed(speed),
            UserInput::SpeedStep(direction) => {
                let step = direction.sign() as f64 * self.config.interaction.speed_step;
                let current = self.playback.with(|s| s.playback_speed);
                self.set_speed(current + step);
            }
            UserInput::SelectQuality(quality) => self.select_quality(quality),
            UserInput::ToggleSettings => self.apply_ui(UiEvent::ToggleSettings),
            UserInput::OpenPanel(panel) => self.apply_ui(UiEvent::OpenPanel(panel)),
            UserInput::CloseSettings => self.apply_ui(UiEvent::CloseSettings),
            UserInput::ToggleSubtitles => self.toggle_subtitles(),
            UserInput::PointerMove => self.on_pointer_move(),
            UserInput::PointerLeave => {
                if self.accepts(DeviceClass::Pointer) {
                    self.hide_controls();
                }
            }
            UserInput::Tap(zone) => self.on_tap(zone),
            UserInput::ControlTouched => {
                if self.accepts(DeviceClass::Touch) {
                    self.show_controls();
                }
            }
            UserInput::Key(key) => self.on_key(key).await,
        }
    }

    fn on_timer(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::Hide(ticket) => {
                let ui = self.ui.get();
                if let Some(event) = self.visibility.on_hide_timer(ticket, &ui, &self.tx) {
                    if self.can_toggle_controls() {
                        self.apply_ui(event);
                    }
                }
            }
            TimerEvent::SeekMode(ticket) => {
                if self.gestures.on_seek_mode_timer(ticket) {
                    self.apply_ui(UiEvent::SetSeekGestureActive(false));
                    self.apply_ui(UiEvent::ResetSeek);
                }
            }
            TimerEvent::SingleTap(ticket) => {
                if self.gestures.on_single_tap_timer(ticket) {
                    self.toggle_controls();
                }
            }
            TimerEvent::PointerThrottle(ticket) => {
                if self.pointer_throttle.on_trailing(ticket) {
                    self.show_controls();
                }
            }
        }
    }

    #[instrument(skip(self))]
    fn on_streaming_error(&mut self, event: StreamingErrorEvent) {
        if self.unmounted {
            return;
        }
        if self.source.handle_streaming_error(&event) == RecoveryAction::Terminal {
            self.fail();
        }
    }

    async fn toggle_play(&mut self) {
        if self.is_error() {
            debug!("Playback failed, ignoring play toggle");
            return;
        }
        if self.media.paused() {
            self.play().await;
        } else {
            self.pause().await;
        }
    }

    fn toggle_mute(&mut self) {
        let muted = self.media.muted();
        if !muted && self.media.volume() <= 0.0 {
            self.media.set_volume(1.0);
            self.media.set_muted(false);
        } else {
            self.media.set_muted(!muted);
        }
    }

    fn set_volume(&mut self, volume: f64) {
        if volume.is_finite() {
            self.media.set_volume(volume.clamp(0.0, 1.0));
        }
    }

    fn set_speed(&mut self, speed: f64) {
        if speed.is_finite() {
            self.media.set_playback_rate(speed.clamp(MIN_SPEED, MAX_SPEED));
        }
    }

    fn clamp_position(&self, time: f64) -> f64 {
        let duration = self.playback.with(|s| s.duration);
        let time = time.max(0.0);
        if duration > 0.0 {
            time.min(duration)
        } else {
            time
        }
    }

    fn seek_to(&mut self, time: f64) {
        if !self.ui.with(|ui| ui.is_controls_visible) {
            debug!("Controls hidden, ignoring seek");
            return;
        }

        let time = self.clamp_position(time);
        self.media.set_current_time(time);
        self.apply_playback(PlaybackEvent::TimeUpdate(time));
        self.show_controls();
    }

    /// Relative seek that feeds the seek-burst indicator.
    fn seek_by(&mut self, amount: i64) {
        let target = self.clamp_position(self.media.current_time() + amount as f64);
        self.media.set_current_time(target);
        self.apply_playback(PlaybackEvent::TimeUpdate(target));
        self.apply_ui(UiEvent::SetSeekGestureActive(true));
        self.apply_ui(UiEvent::AddSeek(amount));
    }

    fn skip(&mut self, direction: Direction) {
        self.seek_by(direction.sign() * self.gestures.seek_step());
        self.gestures.arm_seek_mode(&self.tx);
    }

    fn hover_progress(&mut self, offset: f64, width: f64) -> f64 {
        let fraction = pointer_fraction(offset, width);
        let time = fraction * self.playback.with(|s| s.duration);
        self.apply_ui(UiEvent::SetHover(Some(HoverPosition {
            pixel_offset: fraction * width.max(0.0),
            time,
        })));
        time
    }

    #[instrument(skip(self))]
    fn select_quality(&mut self, quality: u32) {
        if self.is_error() {
            debug!("Playback failed, ignoring quality switch");
            self.apply_ui(UiEvent::CloseSettings);
            return;
        }
        if self.source.switch_quality(quality, self.media.as_mut()) {
            self.apply_playback(PlaybackEvent::Loading(true));
        }
        self.apply_ui(UiEvent::CloseSettings);
    }

    fn toggle_subtitles(&mut self) {
        let enabled = !self.ui.with(|ui| ui.is_subtitles_enabled);
        self.apply_ui(UiEvent::SetSubtitlesEnabled(enabled));
        self.sync_text_track();
    }

    fn sync_text_track(&mut self) {
        if self.config.track.is_none() {
            return;
        }
        let mode = if self.ui.with(|ui| ui.is_subtitles_enabled) {
            TextTrackMode::Hidden
        } else {
            TextTrackMode::Disabled
        };
        self.media.set_text_track_mode(mode);
    }

    fn on_pointer_move(&mut self) {
        if !self.accepts(DeviceClass::Pointer) {
            return;
        }
        if self
            .pointer_throttle
            .call(&self.tx, |ticket| TimerEvent::PointerThrottle(ticket).into())
        {
            self.show_controls();
        }
    }

    fn on_tap(&mut self, zone: TapZone) {
        if !self.accepts(DeviceClass::Touch) {
            return;
        }

        let seek_active = self.ui.with(|ui| ui.is_seek_gesture_active);
        match self.gestures.on_tap(zone, seek_active, &self.tx) {
            TapOutcome::Seek(amount) => self.seek_by(amount),
            TapOutcome::Toggle => self.toggle_controls(),
            TapOutcome::ToggleScheduled => {}
        }
    }

    async fn on_key(&mut self, key: Key) {
        if self.device.is_touch() {
            return;
        }

        self.show_controls();
        match key {
            Key::Space => self.toggle_play().await,
            Key::F => self.toggle_fullscreen().await,
            Key::P => self.toggle_picture_in_picture().await,
            Key::ArrowLeft => self.skip(Direction::Backward),
            Key::ArrowRight => self.skip(Direction::Forward),
        }
    }

    fn supports(&self, capability: Capabilities) -> bool {
        let supported = self.platform.capabilities().contains(capability);
        if !supported {
            debug!(?capability, "Platform capability missing");
        }
        supported
    }

    async fn toggle_fullscreen(&mut self) {
        if !self.supports(Capabilities::FULLSCREEN) {
            return;
        }

        let result = if self.platform.is_fullscreen() {
            self.platform.exit_fullscreen().await
        } else {
            self.platform.request_fullscreen().await
        };
        log_platform_result(result);
    }

    async fn toggle_picture_in_picture(&mut self) {
        if self.is_error() || !self.supports(Capabilities::PICTURE_IN_PICTURE) {
            return;
        }

        let result = if self.platform.is_picture_in_picture() {
            self.platform.exit_picture_in_picture().await
        } else {
            if self.media.paused() {
                self.play().await;
            }
            self.platform.request_picture_in_picture().await
        };
        log_platform_result(result);
    }

    async fn on_fullscreen_changed(&mut self, active: bool) {
        self.apply_ui(UiEvent::SetFullscreen(active));
        if !self.supports(Capabilities::ORIENTATION_LOCK) {
            return;
        }

        let (width, height) = self.media.video_size();
        let result = if active && width > height {
            self.platform.lock_orientation(Orientation::Landscape).await
        } else {
            self.platform.unlock_orientation()
        };
        log_platform_result(result);
    }
}

fn log_platform_result(result: std::result::Result<(), PlatformError>) {
    match result {
        Ok(()) => {}
        Err(PlatformError::Unsupported(feature)) => debug!("{feature} is not supported"),
        Err(e) => warn!(error = %e, "Platform request failed"),
    }
}
