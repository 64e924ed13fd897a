use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::time::Duration;

use crate::model::Stat;
use crate::progress::Progress;

/// Creates the spinner used for live output, hidden when `silent` is set
pub fn spinner(silent: bool) -> ProgressBar {
    if silent {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    bar.set_style(style);
    bar
}

/// Renders the spinner message for a snapshot
pub fn status_line(stat: &Stat, elapsed: Duration) -> String {
    format!(
        "[{}] {} files, {} dirs, {}",
        format_elapsed(elapsed),
        stat.files,
        stat.dirs,
        stat.format_bytes()
    )
}

fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs >= 3600 {
        format!("{}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
    } else {
        format!("{}:{:02}", secs / 60, secs % 60)
    }
}

/// Drives `bar` from the callbacks of `progress`.
///
/// Updates replace the spinner message; `done()` finishes the bar with the
/// final totals.
pub fn attach_progress_bar(progress: &mut Progress, bar: ProgressBar) {
    let live = bar.clone();
    progress.on_update(move |stat, elapsed, _| {
        live.set_message(status_line(&stat, elapsed));
        live.tick();
    });
    progress.on_done(move |stat, elapsed, _| {
        bar.finish_with_message(status_line(&stat, elapsed));
    });
}

/// Logs ticks and the final totals through `log`
pub fn attach_logger(progress: &mut Progress) {
    progress.on_update(|stat, elapsed, tick| {
        if tick {
            info!("{}", status_line(&stat, elapsed));
        }
    });
    progress.on_done(|stat, elapsed, _| {
        info!("Finished in {:?}: {}", elapsed, stat);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line() {
        let stat = Stat::file(4096) + Stat::dir();
        assert_eq!(
            status_line(&stat, Duration::from_secs(75)),
            "[1:15] 1 files, 1 dirs, 4.000 KiB"
        );
    }

    #[test]
    fn test_format_elapsed_hours() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "0:00");
        assert_eq!(format_elapsed(Duration::from_secs(3725)), "1:02:05");
    }

    #[test]
    fn test_progress_bar_finishes_on_done() {
        let bar = spinner(true);
        let mut progress = Progress::new(Duration::from_secs(3600));
        attach_progress_bar(&mut progress, bar.clone());

        progress.start();
        progress.report_file(10);
        assert!(bar.message().contains("1 files"));
        assert!(!bar.is_finished());

        progress.report_dir();
        progress.done();
        assert!(bar.is_finished());
        assert!(bar.message().ends_with("1 files, 1 dirs, 10B"));
    }

    #[test]
    fn test_logger_attaches() {
        let mut progress = Progress::new(Duration::from_millis(1));
        attach_logger(&mut progress);
        progress.start();
        progress.report_dir();
        std::thread::sleep(Duration::from_millis(5));
        progress.done();
        assert_eq!(progress.current(), Stat::dir());
    }
}
