use std::time::Duration;

use tokio::{sync::mpsc, time::Instant};
use tracing::trace;

use crate::config::InteractionConfig;
use crate::services::common::{Timer, TimerTicket};

use super::input::{PlayerInput, TimerEvent};

/// Region of the video surface a tap landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapZone {
    /// Left third: seeks backward
    Left,
    /// Middle: toggles the controls
    Center,
    /// Right third: seeks forward
    Right,
}

/// What a tap resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Seek by this many seconds; the seek burst timer was (re)armed
    Seek(i64),
    /// Toggle the controls now
    Toggle,
    /// Toggle once the debounce timer fires, unless a seek comes first
    ToggleScheduled,
}

/// Double-tap seek detection for touch devices.
///
/// A second tap on a side zone within the double-tap window, or any side
/// tap while a seek burst is active, seeks by one step. Other taps
/// toggle the controls after a short debounce so that the first tap of a
/// double tap does not flash them.
#[derive(Debug)]
pub struct GestureDetector {
    last_tap: Option<Instant>,
    double_tap_window: Duration,
    single_tap_debounce: Duration,
    seek_mode_timeout: Duration,
    seek_step: i64,
    seek_mode: Timer,
    single_tap: Timer,
}

impl GestureDetector {
    /// Create a detector with the windows from `config`.
    pub fn new(config: &InteractionConfig) -> Self {
        Self {
            last_tap: None,
            double_tap_window: config.double_tap_window(),
            single_tap_debounce: config.single_tap_debounce(),
            seek_mode_timeout: config.seek_mode_timeout(),
            seek_step: i64::from(config.seek_step_secs),
            seek_mode: Timer::new("seek-mode"),
            single_tap: Timer::new("single-tap"),
        }
    }

    /// Seconds covered by one seek gesture.
    pub fn seek_step(&self) -> i64 {
        self.seek_step
    }

    /// Classify a tap.
    ///
    /// `seek_active` is the current seek-burst flag of the UI state.
    pub fn on_tap(
        &mut self,
        zone: TapZone,
        seek_active: bool,
        tx: &mpsc::UnboundedSender<PlayerInput>,
    ) -> TapOutcome {
        let sign = match zone {
            TapZone::Left => -1,
            TapZone::Right => 1,
            TapZone::Center => return TapOutcome::Toggle,
        };

        let now = Instant::now();
        let is_double_tap = self.last_tap.is_some_and(|last| {
            let since = now.duration_since(last);
            !since.is_zero() && since < self.double_tap_window
        });
        self.last_tap = Some(now);

        if is_double_tap || seek_active {
            trace!(is_double_tap, seek_active, "tap resolved to seek");
            self.single_tap.cancel();
            self.arm_seek_mode(tx);
            return TapOutcome::Seek(sign * self.seek_step);
        }

        if self.single_tap_debounce.is_zero() {
            return TapOutcome::Toggle;
        }

        self.single_tap.arm(self.single_tap_debounce, tx, |ticket| {
            TimerEvent::SingleTap(ticket).into()
        });
        TapOutcome::ToggleScheduled
    }

    /// (Re)arm the timer ending the current seek burst.
    pub fn arm_seek_mode(&mut self, tx: &mpsc::UnboundedSender<PlayerInput>) {
        self.seek_mode.arm(self.seek_mode_timeout, tx, |ticket| {
            TimerEvent::SeekMode(ticket).into()
        });
    }

    /// Accept a seek-burst expiry. `true` means the burst is over.
    pub fn on_seek_mode_timer(&mut self, ticket: TimerTicket) -> bool {
        self.seek_mode.fire(ticket)
    }

    /// Accept a debounced single tap. `true` means toggle now.
    pub fn on_single_tap_timer(&mut self, ticket: TimerTicket) -> bool {
        self.single_tap.fire(ticket)
    }

    /// Cancel both timers.
    pub fn cancel(&mut self) {
        self.seek_mode.cancel();
        self.single_tap.cancel();
    }
}
