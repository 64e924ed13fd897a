pub mod options;

pub use options::{ProgressOptions, ProgressOptionsBuilder, ScanOptions, ScanOptionsBuilder};
