use std::time::Duration;

use tokio::sync::mpsc;
use tracing::trace;

use crate::config::InteractionConfig;
use crate::services::common::{Timer, TimerTicket};

use super::input::{PlayerInput, TimerEvent};
use super::state::{UiEvent, UiState};

/// Auto-hide logic of the transport controls.
///
/// Showing the controls arms a hide timer; the timer hides them unless a
/// slider drag or an open menu is in progress, in which case it keeps
/// re-arming with the shorter scrubbing delay.
#[derive(Debug)]
pub struct VisibilityController {
    hide_delay: Duration,
    scrub_hide_delay: Duration,
    hide_timer: Timer,
}

impl VisibilityController {
    /// Create a controller with the delays from `config`.
    pub fn new(config: &InteractionConfig) -> Self {
        Self {
            hide_delay: config.hide_delay(),
            scrub_hide_delay: config.scrub_hide_delay(),
            hide_timer: Timer::new("hide"),
        }
    }

    fn delay_for(&self, ui: &UiState) -> Duration {
        if ui.is_scrubbing {
            self.scrub_hide_delay
        } else {
            self.hide_delay
        }
    }

    /// Show the controls and (re)arm the hide timer.
    pub fn show(&mut self, ui: &UiState, tx: &mpsc::UnboundedSender<PlayerInput>) -> UiEvent {
        let delay = self.delay_for(ui);
        self.hide_timer
            .arm(delay, tx, |ticket| TimerEvent::Hide(ticket).into());
        UiEvent::SetControlsVisible(true)
    }

    /// Hide the controls immediately.
    pub fn hide(&mut self) -> UiEvent {
        self.hide_timer.cancel();
        UiEvent::SetControlsVisible(false)
    }

    /// Handle a hide timer firing.
    ///
    /// Returns the event to apply, or `None` for a stale ticket or when
    /// the timer was re-armed because the user is scrubbing.
    pub fn on_hide_timer(
        &mut self,
        ticket: TimerTicket,
        ui: &UiState,
        tx: &mpsc::UnboundedSender<PlayerInput>,
    ) -> Option<UiEvent> {
        if !self.hide_timer.fire(ticket) {
            return None;
        }

        if ui.is_scrubbing {
            trace!("scrubbing, postponing hide");
            self.hide_timer
                .arm(self.scrub_hide_delay, tx, |ticket| TimerEvent::Hide(ticket).into());
            return None;
        }

        Some(UiEvent::SetControlsVisible(false))
    }

    /// Whether a hide is pending.
    pub fn is_hide_pending(&self) -> bool {
        self.hide_timer.is_armed()
    }

    /// Cancel the pending hide, leaving the controls as they are.
    pub fn cancel(&mut self) {
        self.hide_timer.cancel();
    }
}
