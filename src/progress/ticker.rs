use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, select, tick, Receiver, Sender};
use log::trace;

use super::reporter::Shared;

/// One-shot stop signal for a ticker loop.
///
/// Firing more than once is a no-op.
pub(super) struct CancelSignal {
    fired: AtomicBool,
    sender: Sender<()>,
}

impl CancelSignal {
    pub(super) fn new() -> (Self, Receiver<()>) {
        let (sender, receiver) = bounded(1);
        let signal = Self {
            fired: AtomicBool::new(false),
            sender,
        };
        (signal, receiver)
    }

    /// Returns `true` only for the call that actually fired the signal.
    pub(super) fn fire(&self) -> bool {
        if self.fired.swap(true, Ordering::AcqRel) {
            return false;
        }
        let _ = self.sender.try_send(());
        true
    }
}

/// Launches the ticker thread, or nothing for a zero interval.
pub(super) fn spawn(
    interval: Duration,
    shared: Arc<Shared>,
    started: Instant,
    cancelled: Receiver<()>,
) -> Option<JoinHandle<()>> {
    if interval.is_zero() {
        return None;
    }
    Some(thread::spawn(move || {
        run(interval, &shared, started, &cancelled)
    }))
}

fn run(interval: Duration, shared: &Shared, started: Instant, cancelled: &Receiver<()>) {
    let ticks = tick(interval);

    loop {
        select! {
            recv(cancelled) -> _ => {
                trace!("progress ticker stopped");
                return;
            }
            recv(ticks) -> _ => {
                let stat = shared.snapshot();
                trace!("progress tick: {}", stat);
                shared.update(stat, started.elapsed(), true);
            }
        }
    }
}
