//! Scriptable host doubles shared by the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use playdeck::config::{AdaptiveOptions, PlayerConfig};
use playdeck::services::media::{MediaElement, MediaError, TextTrackMode, TimeRange};
use playdeck::services::platform::{Capabilities, Orientation, Platform, PlatformError};
use playdeck::services::player::Player;
use playdeck::services::streaming::{
    SessionReporter, StreamingEngine, StreamingEngineFactory, StreamingError,
};

/// Observable state of the fake media element.
#[derive(Debug)]
pub struct MediaLog {
    pub paused: bool,
    pub current_time: f64,
    pub volume: f64,
    pub muted: bool,
    pub rate: f64,
    pub source: Option<String>,
    pub buffered: Vec<TimeRange>,
    pub native_adaptive: bool,
    pub video_size: (u32, u32),
    pub text_track_mode: Option<TextTrackMode>,
    pub reject_play: bool,
    pub play_calls: usize,
    pub pause_calls: usize,
    pub clear_calls: usize,
}

impl Default for MediaLog {
    fn default() -> Self {
        Self {
            paused: true,
            current_time: 0.0,
            volume: 1.0,
            muted: false,
            rate: 1.0,
            source: None,
            buffered: Vec::new(),
            native_adaptive: false,
            video_size: (1920, 1080),
            text_track_mode: None,
            reject_play: false,
            play_calls: 0,
            pause_calls: 0,
            clear_calls: 0,
        }
    }
}

pub type Shared<T> = Arc<Mutex<T>>;

pub struct FakeMedia {
    pub log: Shared<MediaLog>,
}

#[async_trait]
impl MediaElement for FakeMedia {
    async fn play(&mut self) -> Result<(), MediaError> {
        let mut log = self.log.lock().unwrap();
        log.play_calls += 1;
        if log.reject_play {
            return Err(MediaError::PlayRejected("autoplay blocked".into()));
        }
        log.paused = false;
        Ok(())
    }

    async fn pause(&mut self) -> Result<(), MediaError> {
        let mut log = self.log.lock().unwrap();
        log.pause_calls += 1;
        log.paused = true;
        Ok(())
    }

    fn paused(&self) -> bool {
        self.log.lock().unwrap().paused
    }

    fn current_time(&self) -> f64 {
        self.log.lock().unwrap().current_time
    }

    fn set_current_time(&mut self, time: f64) {
        self.log.lock().unwrap().current_time = time;
    }

    fn duration(&self) -> f64 {
        0.0
    }

    fn volume(&self) -> f64 {
        self.log.lock().unwrap().volume
    }

    fn set_volume(&mut self, volume: f64) {
        self.log.lock().unwrap().volume = volume;
    }

    fn muted(&self) -> bool {
        self.log.lock().unwrap().muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.log.lock().unwrap().muted = muted;
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.log.lock().unwrap().rate = rate;
    }

    fn buffered(&self) -> Vec<TimeRange> {
        self.log.lock().unwrap().buffered.clone()
    }

    fn set_source(&mut self, url: &str) {
        let mut log = self.log.lock().unwrap();
        log.source = Some(url.to_string());
        log.current_time = 0.0;
        log.paused = true;
    }

    fn clear_source(&mut self) {
        let mut log = self.log.lock().unwrap();
        log.source = None;
        log.clear_calls += 1;
    }

    fn supports_native_adaptive(&self) -> bool {
        self.log.lock().unwrap().native_adaptive
    }

    fn video_size(&self) -> (u32, u32) {
        self.log.lock().unwrap().video_size
    }

    fn set_text_track_mode(&mut self, mode: TextTrackMode) {
        self.log.lock().unwrap().text_track_mode = Some(mode);
    }
}

/// Observable state of the fake platform.
#[derive(Debug, Default)]
pub struct PlatformLog {
    pub fullscreen: bool,
    pub picture_in_picture: bool,
    pub locked: Option<Orientation>,
    pub calls: Vec<&'static str>,
}

pub struct FakePlatform {
    pub capabilities: Capabilities,
    pub log: Shared<PlatformLog>,
}

#[async_trait]
impl Platform for FakePlatform {
    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    async fn request_fullscreen(&mut self) -> Result<(), PlatformError> {
        let mut log = self.log.lock().unwrap();
        log.calls.push("request_fullscreen");
        log.fullscreen = true;
        Ok(())
    }

    async fn exit_fullscreen(&mut self) -> Result<(), PlatformError> {
        let mut log = self.log.lock().unwrap();
        log.calls.push("exit_fullscreen");
        log.fullscreen = false;
        Ok(())
    }

    fn is_fullscreen(&self) -> bool {
        self.log.lock().unwrap().fullscreen
    }

    async fn request_picture_in_picture(&mut self) -> Result<(), PlatformError> {
        let mut log = self.log.lock().unwrap();
        log.calls.push("request_picture_in_picture");
        log.picture_in_picture = true;
        Ok(())
    }

    async fn exit_picture_in_picture(&mut self) -> Result<(), PlatformError> {
        let mut log = self.log.lock().unwrap();
        log.calls.push("exit_picture_in_picture");
        log.picture_in_picture = false;
        Ok(())
    }

    fn is_picture_in_picture(&self) -> bool {
        self.log.lock().unwrap().picture_in_picture
    }

    async fn lock_orientation(&mut self, orientation: Orientation) -> Result<(), PlatformError> {
        let mut log = self.log.lock().unwrap();
        log.calls.push("lock_orientation");
        log.locked = Some(orientation);
        Ok(())
    }

    fn unlock_orientation(&mut self) -> Result<(), PlatformError> {
        let mut log = self.log.lock().unwrap();
        log.calls.push("unlock_orientation");
        log.locked = None;
        Ok(())
    }
}

/// Calls made on every engine instance, plus the reporters handed out.
#[derive(Default)]
pub struct EngineLog {
    pub calls: Vec<String>,
    pub reporters: Vec<SessionReporter>,
}

struct FakeEngine {
    log: Shared<EngineLog>,
}

impl StreamingEngine for FakeEngine {
    fn load_source(&mut self, url: &str) {
        self.log.lock().unwrap().calls.push(format!("load_source {url}"));
    }

    fn attach_media(&mut self, _media: &mut dyn MediaElement) {
        self.log.lock().unwrap().calls.push("attach_media".into());
    }

    fn start_load(&mut self) {
        self.log.lock().unwrap().calls.push("start_load".into());
    }

    fn stop_load(&mut self) {
        self.log.lock().unwrap().calls.push("stop_load".into());
    }

    fn recover_media_error(&mut self) {
        self.log.lock().unwrap().calls.push("recover_media_error".into());
    }

    fn destroy(&mut self) {
        self.log.lock().unwrap().calls.push("destroy".into());
    }
}

pub struct FakeEngineFactory {
    pub supported: bool,
    pub log: Shared<EngineLog>,
}

impl StreamingEngineFactory for FakeEngineFactory {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn create(
        &mut self,
        _options: &AdaptiveOptions,
        reporter: SessionReporter,
    ) -> Result<Box<dyn StreamingEngine>, StreamingError> {
        self.log.lock().unwrap().reporters.push(reporter);
        Ok(Box::new(FakeEngine {
            log: Arc::clone(&self.log),
        }))
    }
}

/// A player wired to fakes, with handles on every fake.
pub struct Harness {
    pub player: Player,
    pub media: Shared<MediaLog>,
    pub platform: Shared<PlatformLog>,
    pub engine: Shared<EngineLog>,
}

impl Harness {
    pub fn new(config: PlayerConfig) -> Self {
        Self::with_media(config, MediaLog::default())
    }

    pub fn with_media(config: PlayerConfig, media: MediaLog) -> Self {
        let media = Arc::new(Mutex::new(media));
        let platform = Shared::<PlatformLog>::default();
        let engine = Shared::<EngineLog>::default();

        let player = Player::new(
            config,
            Box::new(FakeMedia {
                log: Arc::clone(&media),
            }),
            Box::new(FakePlatform {
                capabilities: Capabilities::all(),
                log: Arc::clone(&platform),
            }),
            Box::new(FakeEngineFactory {
                supported: true,
                log: Arc::clone(&engine),
            }),
        )
        .unwrap();

        Self {
            player,
            media,
            platform,
            engine,
        }
    }

    pub fn engine_calls(&self) -> Vec<String> {
        self.engine.lock().unwrap().calls.clone()
    }

    pub fn reporter(&self, index: usize) -> SessionReporter {
        self.engine.lock().unwrap().reporters[index].clone()
    }
}

pub fn config(toml: &str) -> PlayerConfig {
    PlayerConfig::from_toml_str(toml).unwrap()
}
