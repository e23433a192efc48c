//! Tick scheduling port.
//!
//! The engine only talks to [`Scheduler`]; the binary plugs in the tokio
//! implementation and tests drive the engine through [`ManualScheduler`].

pub mod manual;
pub mod tokio_clock;

pub use manual::ManualScheduler;
pub use tokio_clock::{TickReceiver, TokioScheduler};

use std::time::Duration;

/// Identifies one schedule. Handles are never reused, so a tick carrying an
/// old handle can be told apart from a tick of the current schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickHandle(pub u64);

/// Source of periodic ticks whose period can change at runtime
pub trait Scheduler {
    /// Start ticking every `period`. The first tick fires one period from now.
    fn schedule(&mut self, period: Duration) -> TickHandle;

    /// Stop a schedule. Cancelling an unknown or already cancelled handle is a no-op.
    fn cancel(&mut self, handle: TickHandle);
}
