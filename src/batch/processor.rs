use log::{info, warn};
use rayon::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use walkdir::{DirEntry, WalkDir};

use crate::config::ScanOptions;
use crate::error::ScanError;
use crate::model::Stat;
use crate::progress::Reporter;

/// Walks a directory tree and reports every directory and file it finds
pub struct TreeScanner {
    options: ScanOptions,
}

/// Result of a scan, independent of the reporter it fed
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    /// Totals of everything that was reported
    pub stat: Stat,
    /// Number of entries that could not be read
    pub errors: usize,
}

impl TreeScanner {
    /// Creates a new TreeScanner instance
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Scans `root`, reporting into `progress` from parallel workers.
    ///
    /// Directories (including `root`) are reported while walking; files are
    /// stat'ed and reported on the worker pool. Unreadable entries are
    /// counted in [`ScanSummary::errors`] and do not abort the scan.
    pub fn scan<R>(&self, root: &Path, progress: &R) -> Result<ScanSummary, ScanError>
    where
        R: Reporter + Sync,
    {
        let metadata = std::fs::metadata(root).map_err(|e| ScanError::io_error(root, e))?;
        if !metadata.is_dir() {
            return Err(ScanError::InvalidRoot(format!(
                "not a directory: {}",
                root.display()
            )));
        }

        let mut walker = WalkDir::new(root).follow_links(self.options.follow_links);
        if let Some(depth) = self.options.max_depth {
            walker = walker.max_depth(depth);
        }

        info!("Scanning directory: {}", root.display());
        let errors = AtomicUsize::new(0);
        let mut dirs = Stat::default();
        let mut files = Vec::new();

        let entries = walker
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !self.is_ignored(e));
        for entry in entries {
            match entry {
                Ok(entry) if entry.file_type().is_dir() => {
                    progress.report_dir();
                    dirs += Stat::dir();
                }
                Ok(entry) => files.push(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    errors.fetch_add(1, Ordering::SeqCst);
                }
            }
        }

        info!("Found {} files to process", files.len());

        // Stat files in parallel using rayon
        let pool = self.build_pool()?;
        let file_stats: Stat = pool.install(|| {
            files
                .par_iter()
                .filter_map(|entry| match entry.metadata() {
                    Ok(metadata) => {
                        progress.report_file(metadata.len());
                        Some(Stat::file(metadata.len()))
                    }
                    Err(e) => {
                        warn!("Error reading {}: {}", entry.path().display(), e);
                        errors.fetch_add(1, Ordering::SeqCst);
                        None
                    }
                })
                .sum()
        });

        let summary = ScanSummary {
            stat: dirs + file_stats,
            errors: errors.load(Ordering::SeqCst),
        };
        info!("Scanned {} ({} errors)", summary.stat, summary.errors);
        Ok(summary)
    }

    fn is_ignored(&self, entry: &DirEntry) -> bool {
        entry
            .file_name()
            .to_str()
            .is_some_and(|name| self.options.is_ignored(name))
    }

    fn build_pool(&self) -> Result<rayon::ThreadPool, ScanError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.workers.unwrap_or(0))
            .thread_name(|i| format!("walkstat-scan-{}", i))
            .build()?;
        Ok(pool)
    }
}

impl Default for TreeScanner {
    fn default() -> Self {
        Self::new(ScanOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanOptionsBuilder;
    use crate::progress::Progress;
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    fn fixture() -> tempfile::TempDir {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::create_dir(root.join("c")).unwrap();
        fs::write(root.join("top.txt"), vec![0u8; 100]).unwrap();
        fs::write(root.join("a/one.bin"), vec![0u8; 2048]).unwrap();
        fs::write(root.join("a/b/two.tmp"), vec![0u8; 10]).unwrap();
        fs::write(root.join("c/three.txt"), b"abc").unwrap();
        temp_dir
    }

    #[test]
    fn test_scan_reports_everything() {
        let temp_dir = fixture();
        let progress = Progress::new(Duration::from_secs(3600));
        progress.start();

        let summary = TreeScanner::default()
            .scan(temp_dir.path(), &progress)
            .unwrap();

        // root, a, a/b, c
        assert_eq!(summary.stat.dirs, 4);
        assert_eq!(summary.stat.files, 4);
        assert_eq!(summary.stat.bytes, 100 + 2048 + 10 + 3);
        assert_eq!(summary.errors, 0);
        assert_eq!(progress.current(), summary.stat);
        progress.done();
    }

    #[test]
    fn test_scan_without_reporter() {
        let temp_dir = fixture();
        let summary = TreeScanner::default()
            .scan(temp_dir.path(), &None::<Progress>)
            .unwrap();
        assert_eq!(summary.stat.files, 4);
    }

    #[test]
    fn test_scan_respects_ignore_and_depth() {
        let temp_dir = fixture();
        let scanner = TreeScanner::new(
            ScanOptionsBuilder::new()
                .ignore_patterns(Some(vec![".tmp".to_string()]))
                .build(),
        );
        let summary = scanner.scan(temp_dir.path(), &None::<Progress>).unwrap();
        assert_eq!(summary.stat.files, 3);

        let shallow = TreeScanner::new(
            ScanOptionsBuilder::new()
                .max_depth(Some(1))
                .workers(Some(2))
                .build(),
        );
        let summary = shallow.scan(temp_dir.path(), &None::<Progress>).unwrap();
        assert_eq!(summary.stat.dirs, 3);
        assert_eq!(summary.stat.files, 1);
        assert_eq!(summary.stat.bytes, 100);
    }

    #[test]
    fn test_scan_rejects_file_root() {
        let temp_dir = fixture();
        let result = TreeScanner::default().scan(&temp_dir.path().join("top.txt"), &None::<Progress>);
        assert!(matches!(result, Err(ScanError::InvalidRoot(_))));
    }

    #[test]
    fn test_scan_missing_root() {
        let temp_dir = tempdir().unwrap();
        let result = TreeScanner::default().scan(&temp_dir.path().join("missing"), &None::<Progress>);
        assert!(matches!(result, Err(ScanError::Io { .. })));
    }
}
