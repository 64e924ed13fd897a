use std::sync::Arc;

use super::Progress;
use crate::model::Stat;

/// The reporting contract shared by [`Progress`] and the absent reporter.
///
/// `Option<R>` implements it with `None` acting as a no-op sentinel: every
/// call is ignored and [`current`](Reporter::current) returns a zero
/// [`Stat`]. Call sites can therefore take an optional reporter without
/// branching.
pub trait Reporter {
    fn start(&self);

    fn report(&self, delta: Stat);

    fn report_file(&self, size: u64) {
        self.report(Stat::file(size));
    }

    fn report_dir(&self) {
        self.report(Stat::dir());
    }

    fn current(&self) -> Stat;

    fn reset(&self);

    fn done(&self);
}

impl Reporter for Progress {
    fn start(&self) {
        Progress::start(self)
    }

    fn report(&self, delta: Stat) {
        Progress::report(self, delta)
    }

    fn current(&self) -> Stat {
        Progress::current(self)
    }

    fn reset(&self) {
        Progress::reset(self)
    }

    fn done(&self) {
        Progress::done(self)
    }
}

impl<R: Reporter> Reporter for Option<R> {
    fn start(&self) {
        if let Some(reporter) = self {
            reporter.start();
        }
    }

    fn report(&self, delta: Stat) {
        if let Some(reporter) = self {
            reporter.report(delta);
        }
    }

    fn current(&self) -> Stat {
        self.as_ref().map(Reporter::current).unwrap_or_default()
    }

    fn reset(&self) {
        if let Some(reporter) = self {
            reporter.reset();
        }
    }

    fn done(&self) {
        if let Some(reporter) = self {
            reporter.done();
        }
    }
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn start(&self) {
        (**self).start()
    }

    fn report(&self, delta: Stat) {
        (**self).report(delta)
    }

    fn current(&self) -> Stat {
        (**self).current()
    }

    fn reset(&self) {
        (**self).reset()
    }

    fn done(&self) {
        (**self).done()
    }
}

impl<R: Reporter + ?Sized> Reporter for Arc<R> {
    fn start(&self) {
        (**self).start()
    }

    fn report(&self, delta: Stat) {
        (**self).report(delta)
    }

    fn current(&self) -> Stat {
        (**self).current()
    }

    fn reset(&self) {
        (**self).reset()
    }

    fn done(&self) {
        (**self).done()
    }
}
