pub mod display;
pub mod processor;

pub use display::{attach_logger, attach_progress_bar, spinner, status_line};
pub use processor::{ScanSummary, TreeScanner};
