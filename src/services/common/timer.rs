use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle, time::Instant};
use tracing::trace;

/// Identifies one arming of a [`Timer`].
///
/// A timer that fires posts its ticket back to the owner, which hands it to
/// [`Timer::fire`]. Tickets from canceled or re-armed timers are rejected,
/// so a message already in flight can never act on newer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerTicket(u64);

/// One-shot cancelable timer delivering a message into a channel.
///
/// Re-arming cancels the pending firing. The task is aborted on drop.
#[derive(Debug)]
pub(crate) struct Timer {
    name: &'static str,
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl Timer {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            generation: 0,
            task: None,
        }
    }

    /// Arm the timer, replacing any pending firing.
    ///
    /// After `delay`, the message built by `message` is sent on `tx`.
    pub(crate) fn arm<M>(
        &mut self,
        delay: Duration,
        tx: &mpsc::UnboundedSender<M>,
        message: impl FnOnce(TimerTicket) -> M,
    ) -> TimerTicket
    where
        M: Send + 'static,
    {
        self.cancel();
        self.generation += 1;

        let ticket = TimerTicket(self.generation);
        let message = message(ticket);
        let tx = tx.clone();
        let deadline = Instant::now() + delay;

        trace!("arming {} timer for {:?}", self.name, delay);
        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let _ = tx.send(message);
        }));

        ticket
    }

    /// Cancel the pending firing. Returns whether one was pending.
    pub(crate) fn cancel(&mut self) -> bool {
        match self.task.take() {
            Some(task) => {
                task.abort();
                true
            }
            None => false,
        }
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.task.is_some()
    }

    /// Accept a delivered ticket, disarming the timer.
    ///
    /// Returns `false` when the ticket belongs to a canceled or
    /// superseded arming.
    pub(crate) fn fire(&mut self, ticket: TimerTicket) -> bool {
        if self.task.is_some() && ticket.0 == self.generation {
            self.task = None;
            true
        } else {
            trace!("dropping stale {} timer ticket", self.name);
            false
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.cancel();
    }
}
