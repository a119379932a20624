use std::time::Duration;

use tokio::task::AbortHandle;

/// Identifies one scheduled timer. A timer may only act if the ticket stored
/// next to the state it protects is still its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TimerTicket(u64);

#[derive(Debug, Default)]
pub(crate) struct TimerTickets(u64);

impl TimerTickets {
    pub(crate) fn next(&mut self) -> TimerTicket {
        self.0 += 1;
        TimerTicket(self.0)
    }
}

/// Handle of a timer task. Dropping the handle cancels the timer.
#[derive(Debug)]
pub(crate) struct ScheduledTimer {
    ticket: TimerTicket,
    task: AbortHandle,
}

impl ScheduledTimer {
    /// Runs `on_expiry` once `delay` has elapsed, unless the returned handle
    /// is dropped first.
    ///
    /// Must be called from within a tokio runtime.
    pub(crate) fn spawn(
        ticket: TimerTicket,
        delay: Duration,
        on_expiry: impl FnOnce(TimerTicket) + Send + 'static,
    ) -> Self {
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_expiry(ticket);
        })
        .abort_handle();

        Self { ticket, task }
    }

    pub(crate) fn ticket(&self) -> TimerTicket {
        self.ticket
    }
}

impl Drop for ScheduledTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
