// Re-export the primary types and functions
pub mod batch;
pub mod config;
pub mod error;
pub mod model;
pub mod progress;

use std::path::Path;

use error::ScanError;

pub use batch::{attach_logger, attach_progress_bar, ScanSummary, TreeScanner};
pub use config::{ProgressOptions, ProgressOptionsBuilder, ScanOptions, ScanOptionsBuilder};
pub use error::UsageError;
pub use model::{format_bytes, Stat};
pub use progress::{Progress, ProgressFn, Reporter};

/// Scans a directory tree with a live spinner and returns the totals.
///
/// The spinner is hidden when `options.silent` is set. The reporter is
/// always finished, even when the scan fails.
pub fn scan_directory(
    root: &Path,
    scan: &ScanOptions,
    options: &ProgressOptions,
) -> Result<ScanSummary, ScanError> {
    let mut progress = Progress::with_options(options);
    attach_progress_bar(&mut progress, batch::spinner(options.silent));

    progress.start();
    let result = TreeScanner::new(scan.clone()).scan(root, &progress);
    progress.done();

    result
}
