use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Options for progress reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressOptions {
    /// Interval between background updates; zero disables them
    pub interval: Duration,

    /// Whether to suppress the live display
    pub silent: bool,

    /// Whether to print the final statistics
    pub show_stats: bool,
}

impl Default for ProgressOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(250),
            silent: false,
            show_stats: true,
        }
    }
}

/// Builder pattern for ProgressOptions
pub struct ProgressOptionsBuilder {
    options: ProgressOptions,
}

impl ProgressOptionsBuilder {
    /// Creates a new ProgressOptionsBuilder with default values
    pub fn new() -> Self {
        Self {
            options: ProgressOptions::default(),
        }
    }

    /// Sets the update interval
    pub fn interval(mut self, interval: Duration) -> Self {
        self.options.interval = interval;
        self
    }

    /// Sets whether to suppress the live display
    pub fn silent(mut self, silent: bool) -> Self {
        self.options.silent = silent;
        self
    }

    /// Sets whether to print the final statistics
    pub fn show_stats(mut self, show: bool) -> Self {
        self.options.show_stats = show;
        self
    }

    /// Builds the ProgressOptions
    pub fn build(self) -> ProgressOptions {
        self.options
    }
}

impl Default for ProgressOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Options for directory traversal
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanOptions {
    /// Maximum directory recursion depth, unlimited when unset
    pub max_depth: Option<usize>,

    /// Whether to follow symbolic links
    pub follow_links: bool,

    /// Optional number of worker threads
    pub workers: Option<usize>,

    /// Optional patterns to ignore when scanning
    pub ignore_patterns: Option<Vec<String>>,
}

impl ScanOptions {
    /// Returns true if the file name matches one of the ignore patterns
    pub fn is_ignored(&self, file_name: &str) -> bool {
        self.ignore_patterns
            .as_ref()
            .is_some_and(|patterns| patterns.iter().any(|p| file_name.contains(p.as_str())))
    }
}

/// Builder pattern for ScanOptions
#[derive(Default)]
pub struct ScanOptionsBuilder {
    options: ScanOptions,
}

impl ScanOptionsBuilder {
    /// Creates a new ScanOptionsBuilder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum recursion depth
    pub fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.options.max_depth = depth;
        self
    }

    /// Sets whether to follow symbolic links
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.options.follow_links = follow;
        self
    }

    /// Sets the number of worker threads
    pub fn workers(mut self, workers: Option<usize>) -> Self {
        self.options.workers = workers;
        self
    }

    /// Sets patterns to ignore
    pub fn ignore_patterns(mut self, patterns: Option<Vec<String>>) -> Self {
        self.options.ignore_patterns = patterns;
        self
    }

    /// Builds the ScanOptions
    pub fn build(self) -> ScanOptions {
        self.options
    }
}
