//! Periodic callbacks for timer-driven games.
//!
//! Game logic never reads a clock. Snake movement and the memory timer are
//! driven by a [`Scheduler`]: [`TokioScheduler`] for real play,
//! [`ManualScheduler`] for tests that step a virtual clock.

use std::collections::HashMap;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, instrument};

/// Shortest interval a scheduler accepts; shorter requests are raised to it.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Callback run on every tick.
pub type TickCallback = Box<dyn FnMut() + Send + 'static>;

/// Identifies a registered periodic callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickHandle(u64);

/// Runs callbacks at a fixed interval until cancelled.
pub trait Scheduler {
    /// Registers `callback` to run every `interval`, first after one interval.
    fn on_tick(&mut self, interval: Duration, callback: TickCallback) -> TickHandle;

    /// Stops a callback. Returns false if the handle was not active.
    fn cancel(&mut self, handle: TickHandle) -> bool;
}

struct ManualTimer {
    interval: Duration,
    next_due: Duration,
    callback: TickCallback,
}

/// Scheduler driven by an explicit virtual clock.
#[derive(Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    timers: HashMap<TickHandle, ManualTimer>,
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("now", &self.now)
            .field("timers", &self.timers.len())
            .finish()
    }
}

impl ManualScheduler {
    /// Creates a scheduler with its clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed so far.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of active callbacks.
    pub fn active(&self) -> usize {
        self.timers.len()
    }

    /// Moves the clock forward, firing every callback that falls due in order.
    ///
    /// Returns how many callbacks ran.
    pub fn advance(&mut self, by: Duration) -> usize {
        let target = self.now + by;
        let mut fired = 0;
        loop {
            let due = self
                .timers
                .iter()
                .filter(|(_, t)| t.next_due <= target)
                .min_by_key(|(handle, t)| (t.next_due, **handle))
                .map(|(handle, _)| *handle);
            let Some(handle) = due else { break };
            if let Some(timer) = self.timers.get_mut(&handle) {
                self.now = timer.next_due;
                timer.next_due += timer.interval;
                (timer.callback)();
                fired += 1;
            }
        }
        self.now = target;
        fired
    }
}

impl Scheduler for ManualScheduler {
    fn on_tick(&mut self, interval: Duration, callback: TickCallback) -> TickHandle {
        let interval = interval.max(MIN_INTERVAL);
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        self.timers.insert(
            handle,
            ManualTimer {
                interval,
                next_due: self.now + interval,
                callback,
            },
        );
        handle
    }

    fn cancel(&mut self, handle: TickHandle) -> bool {
        self.timers.remove(&handle).is_some()
    }
}

/// Scheduler backed by tokio interval tasks.
///
/// Dropping it aborts every task it started.
#[derive(Debug)]
pub struct TokioScheduler {
    runtime: Handle,
    next_id: u64,
    tasks: HashMap<TickHandle, JoinHandle<()>>,
}

impl TokioScheduler {
    /// Creates a scheduler spawning onto `runtime`.
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            next_id: 0,
            tasks: HashMap::new(),
        }
    }

    /// Creates a scheduler on the runtime of the calling task.
    ///
    /// # Errors
    ///
    /// Fails when called outside a tokio runtime.
    pub fn current() -> Result<Self, tokio::runtime::TryCurrentError> {
        Handle::try_current().map(Self::new)
    }
}

impl Scheduler for TokioScheduler {
    #[instrument(skip(self, callback))]
    fn on_tick(&mut self, interval: Duration, mut callback: TickCallback) -> TickHandle {
        let interval = interval.max(MIN_INTERVAL);
        self.next_id += 1;
        let handle = TickHandle(self.next_id);
        let task = self.runtime.spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                callback();
            }
        });
        self.tasks.insert(handle, task);
        debug!(?handle, "Tick task started");
        handle
    }

    fn cancel(&mut self, handle: TickHandle) -> bool {
        match self.tasks.remove(&handle) {
            Some(task) => {
                task.abort();
                debug!(?handle, "Tick task cancelled");
                true
            }
            None => false,
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for task in self.tasks.values() {
            task.abort();
        }
    }
}
