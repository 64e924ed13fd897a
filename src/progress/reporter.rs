use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{debug, warn};
use parking_lot::Mutex;

use super::ticker::{self, CancelSignal};
use crate::config::ProgressOptions;
use crate::error::UsageError;
use crate::model::Stat;

/// Callback receiving a snapshot, the time since `start()` and whether the
/// call came from the background ticker.
pub type ProgressFn = Box<dyn FnMut(Stat, Duration, bool) + Send>;

#[derive(Default)]
struct Hooks {
    on_update: Option<ProgressFn>,
    on_done: Option<ProgressFn>,
    // Set once on_done has been entered; later updates are dropped.
    finished: bool,
}

/// State shared between a [`Progress`] and its ticker thread.
///
/// `total` is the counter lock and is never held across a callback. `hooks`
/// is the callback lock, so on_update and on_done never run concurrently.
#[derive(Default)]
pub(super) struct Shared {
    total: Mutex<Stat>,
    hooks: Mutex<Hooks>,
}

impl Shared {
    fn add(&self, delta: Stat) -> Stat {
        let mut total = self.total.lock();
        *total += delta;
        *total
    }

    pub(super) fn snapshot(&self) -> Stat {
        *self.total.lock()
    }

    fn clear(&self) {
        *self.total.lock() = Stat::default();
    }

    pub(super) fn set_on_update(&self, f: ProgressFn) {
        self.hooks.lock().on_update = Some(f);
    }

    fn set_on_done(&self, f: ProgressFn) {
        self.hooks.lock().on_done = Some(f);
    }

    pub(super) fn update(&self, stat: Stat, elapsed: Duration, tick: bool) {
        let mut hooks = self.hooks.lock();
        if hooks.finished {
            return;
        }
        if let Some(on_update) = hooks.on_update.as_mut() {
            on_update(stat, elapsed, tick);
        }
    }

    fn finish(&self, stat: Stat, elapsed: Duration) {
        let mut hooks = self.hooks.lock();
        hooks.finished = true;
        if let Some(on_done) = hooks.on_done.as_mut() {
            on_done(stat, elapsed, false);
        }
    }
}

struct Run {
    started: Instant,
    cancel: CancelSignal,
    ticker: Option<JoinHandle<()>>,
}

impl Run {
    /// Stops the ticker and waits for any in-flight tick callback.
    fn shutdown(&mut self) {
        self.cancel.fire();
        if let Some(handle) = self.ticker.take() {
            if handle.join().is_err() {
                warn!("progress ticker thread panicked");
            }
        }
    }
}

enum Lifecycle {
    Unstarted,
    Running(Run),
    Stopped,
}

impl Lifecycle {
    fn take_run(&mut self) -> Option<Run> {
        match std::mem::replace(self, Lifecycle::Stopped) {
            Lifecycle::Running(run) => Some(run),
            other => {
                *self = other;
                None
            }
        }
    }
}

/// Accumulates [`Stat`] deltas from concurrent producers and surfaces
/// snapshots to an update callback.
///
/// After [`start`](Progress::start), `on_update` is called synchronously on
/// every [`report`](Progress::report) and at least once per interval from a
/// background thread. `on_done` is called exactly once by
/// [`done`](Progress::done). Both callbacks are serialized, so they may share
/// output state without further locking.
///
/// Calling `start` twice, or any of `report`, `reset` and `done` outside a
/// run, panics. A finished instance cannot be started again.
pub struct Progress {
    interval: Duration,
    shared: Arc<Shared>,
    state: Mutex<Lifecycle>,
}

impl Progress {
    /// Creates a reporter that ticks every `interval`.
    ///
    /// A zero interval disables the ticker; updates then only come from
    /// reports.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            shared: Arc::new(Shared::default()),
            state: Mutex::new(Lifecycle::Unstarted),
        }
    }

    pub fn with_options(options: &ProgressOptions) -> Self {
        Self::new(options.interval)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Sets the callback invoked on every report and tick.
    pub fn on_update<F>(&mut self, f: F)
    where
        F: FnMut(Stat, Duration, bool) + Send + 'static,
    {
        self.shared.set_on_update(Box::new(f));
    }

    /// Sets the callback invoked once by `done()`.
    pub fn on_done<F>(&mut self, f: F)
    where
        F: FnMut(Stat, Duration, bool) + Send + 'static,
    {
        self.shared.set_on_done(Box::new(f));
    }

    pub fn is_running(&self) -> bool {
        matches!(*self.state.lock(), Lifecycle::Running(_))
    }

    /// Resets the counters and launches the background ticker.
    pub fn start(&self) {
        let mut state = self.state.lock();
        match *state {
            Lifecycle::Running(_) => UsageError::AlreadyRunning.fatal(),
            Lifecycle::Stopped => UsageError::Restarted.fatal(),
            Lifecycle::Unstarted => {}
        }

        self.shared.clear();
        let started = Instant::now();
        let (cancel, cancelled) = CancelSignal::new();
        let ticker = ticker::spawn(self.interval, Arc::clone(&self.shared), started, cancelled);

        *state = Lifecycle::Running(Run {
            started,
            cancel,
            ticker,
        });
        debug!("progress reporter started, interval {:?}", self.interval);
    }

    /// Adds `delta` to the running total and reports the new total.
    ///
    /// Returns after `on_update` has completed.
    pub fn report(&self, delta: Stat) {
        let started = self.started_at("report");
        let total = self.shared.add(delta);
        self.shared.update(total, started.elapsed(), false);
    }

    /// Reports a file with the given size.
    pub fn report_file(&self, size: u64) {
        self.report(Stat::file(size));
    }

    /// Reports a directory.
    pub fn report_dir(&self) {
        self.report(Stat::dir());
    }

    /// Returns a copy of the running total.
    pub fn current(&self) -> Stat {
        self.shared.snapshot()
    }

    /// Zeroes all counters.
    pub fn reset(&self) {
        self.started_at("reset");
        self.shared.clear();
    }

    /// Stops the ticker and hands the final total to `on_done`.
    pub fn done(&self) {
        let run = self.state.lock().take_run();
        let Some(mut run) = run else {
            UsageError::not_running("done").fatal()
        };

        run.shutdown();
        let total = self.shared.snapshot();
        let elapsed = run.started.elapsed();
        debug!("progress reporter done after {:?}: {}", elapsed, total);
        self.shared.finish(total, elapsed);
    }

    #[track_caller]
    fn started_at(&self, operation: &'static str) -> Instant {
        match &*self.state.lock() {
            Lifecycle::Running(run) => run.started,
            _ => UsageError::not_running(operation).fatal(),
        }
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        if let Lifecycle::Running(run) = self.state.get_mut() {
            debug!("progress reporter dropped while running");
            run.shutdown();
        }
    }
}

impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress")
            .field("interval", &self.interval)
            .field("running", &self.is_running())
            .field("current", &self.current())
            .finish()
    }
}
