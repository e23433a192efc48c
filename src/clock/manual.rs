use super::{Scheduler, TickHandle};
use std::time::Duration;

/// Scheduler that never fires on its own. It records what was asked of it so
/// tests can fire ticks by hand and inspect the live schedules.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    active: Vec<(TickHandle, Duration)>,
    scheduled: Vec<Duration>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules that have not been cancelled
    pub fn active(&self) -> &[(TickHandle, Duration)] {
        &self.active
    }

    /// The most recent live schedule
    pub fn current(&self) -> Option<(TickHandle, Duration)> {
        self.active.last().copied()
    }

    /// Every period ever requested, in order
    pub fn history(&self) -> &[Duration] {
        &self.scheduled
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, period: Duration) -> TickHandle {
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        self.active.push((handle, period));
        self.scheduled.push(period);
        handle
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.active.retain(|(h, _)| *h != handle);
    }
}
