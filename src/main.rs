use clap::Parser;
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use walkstat::{scan_directory, ProgressOptionsBuilder, ScanOptionsBuilder};

/// Count files, directories and bytes below a path with live progress
#[derive(Parser, Debug)]
#[command(name = "walkstat", version, about)]
struct Cli {
    /// Directory to scan
    path: PathBuf,

    /// Milliseconds between progress updates (0 disables periodic updates)
    #[arg(long, default_value_t = 250)]
    interval_ms: u64,

    /// Maximum recursion depth
    #[arg(long)]
    max_depth: Option<usize>,

    /// Follow symbolic links
    #[arg(long)]
    follow_links: bool,

    /// Number of worker threads
    #[arg(long)]
    workers: Option<usize>,

    /// Skip entries whose name contains PATTERN (repeatable)
    #[arg(long = "ignore", value_name = "PATTERN")]
    ignore: Vec<String>,

    /// Print the final statistics as JSON
    #[arg(long)]
    json: bool,

    /// Suppress the live progress display
    #[arg(short, long)]
    silent: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let scan = ScanOptionsBuilder::new()
        .max_depth(cli.max_depth)
        .follow_links(cli.follow_links)
        .workers(cli.workers)
        .ignore_patterns((!cli.ignore.is_empty()).then(|| cli.ignore.clone()))
        .build();
    let options = ProgressOptionsBuilder::new()
        .interval(Duration::from_millis(cli.interval_ms))
        .silent(cli.silent)
        .build();

    let summary = match scan_directory(&cli.path, &scan, &options) {
        Ok(summary) => summary,
        Err(e) => {
            error!("Scan failed: {}", e);
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if cli.json {
        match serde_json::to_string_pretty(&summary.stat) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else if options.show_stats {
        println!("{}", summary.stat);
    }

    if summary.errors > 0 {
        eprintln!("{} entries could not be read", summary.errors);
    }

    ExitCode::SUCCESS
}
