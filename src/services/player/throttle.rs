use std::time::Duration;

use tokio::{sync::mpsc, time::Instant};

use crate::services::common::{Timer, TimerTicket};

/// Rate limiter with a leading and a single trailing call.
///
/// The first call runs immediately. Calls arriving within the window of
/// the last run collapse into one trailing run scheduled at the end of
/// that window. Calls arriving after the window run immediately again.
#[derive(Debug)]
pub struct Throttle {
    window: Duration,
    last_run: Option<Instant>,
    trailing: Timer,
}

impl Throttle {
    /// Create a throttle allowing one run per `window`.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_run: None,
            trailing: Timer::new("throttle"),
        }
    }

    /// Register a call.
    ///
    /// Returns `true` when the caller should run now. Otherwise a trailing
    /// run is (re)scheduled and will be announced by a message built from
    /// `trailing`, to be passed back to [`Throttle::on_trailing`].
    pub fn call<M>(
        &mut self,
        tx: &mpsc::UnboundedSender<M>,
        trailing: impl FnOnce(TimerTicket) -> M,
    ) -> bool
    where
        M: Send + 'static,
    {
        let now = Instant::now();

        match self.last_run {
            Some(last) if now.duration_since(last) < self.window => {
                let remaining = self.window - now.duration_since(last);
                self.trailing.arm(remaining, tx, trailing);
                false
            }
            _ => {
                self.trailing.cancel();
                self.last_run = Some(now);
                true
            }
        }
    }

    /// Accept a trailing-run message. Returns `true` when the caller
    /// should run now.
    pub fn on_trailing(&mut self, ticket: TimerTicket) -> bool {
        if self.trailing.fire(ticket) {
            self.last_run = Some(Instant::now());
            true
        } else {
            false
        }
    }

    /// Drop any scheduled trailing run.
    pub fn cancel(&mut self) {
        self.trailing.cancel();
    }
}
