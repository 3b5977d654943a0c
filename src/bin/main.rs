//! CLI binary for the FDR parser
//!
//! Reads Avidyne and Garmin flight logs and either prints a per-file
//! summary, dumps selected columns, or aggregates a cylinder head
//! temperature histogram across all input files.

use anyhow::Result;
use clap::{Arg, Command};
use fdr_parser::{CylinderHistogram, FlightLog, COLUMN_NAME_ELAPSED};
use glob::glob;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let matches = Command::new("FDR Parser")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Read Avidyne and Garmin flight data recorder logs.")
        .arg(
            Arg::new("files")
                .help("Log files to parse (.csv, supports globbing)")
                .required(true)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("histogram")
                .long("histogram")
                .help("Aggregate a cylinder head temperature histogram across all files")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("columns")
                .long("columns")
                .help("Comma-separated column names to dump (\"timestamp\" and \"elapsed\" are virtual)")
                .value_name("NAMES"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let debug = matches.get_flag("debug");
    let histogram = matches.get_flag("histogram");
    let columns = matches.get_one::<String>("columns").cloned();
    let file_patterns: Vec<&String> = matches.get_many::<String>("files").unwrap().collect();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "warn" })),
        )
        .init();

    // Collect all valid file paths
    let mut valid_paths: Vec<PathBuf> = Vec::new();
    for pattern in &file_patterns {
        if pattern.contains('*') || pattern.contains('?') {
            match glob(pattern) {
                Ok(glob_iter) => {
                    for entry in glob_iter {
                        match entry {
                            Ok(path) => valid_paths.push(path),
                            Err(e) => eprintln!("Error expanding glob pattern '{pattern}': {e}"),
                        }
                    }
                }
                Err(e) => eprintln!("Invalid glob pattern '{pattern}': {e}"),
            }
        } else {
            let path = Path::new(pattern).to_path_buf();
            if path.exists() {
                valid_paths.push(path);
            } else {
                eprintln!("Warning: File does not exist: {path:?}");
            }
        }
    }

    if valid_paths.is_empty() {
        eprintln!("Error: No valid files found to process.");
        eprintln!("Input patterns were: {file_patterns:?}");
        std::process::exit(1);
    }

    let mut hist = CylinderHistogram::new();
    let mut processed_files = 0;

    for path in &valid_paths {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown");

        let mut log = match FlightLog::open(path) {
            Ok(log) => log,
            Err(e) => {
                eprintln!("Error reading {filename}: {e}");
                continue;
            }
        };

        let result = if histogram {
            hist.accumulate(&mut log)
        } else if let Some(columns) = &columns {
            dump_columns(&mut log, columns)
        } else {
            print_summary(&log, filename);
            Ok(())
        };

        match result {
            Ok(()) => processed_files += 1,
            Err(e) => eprintln!("Error reading {filename}: {e}"),
        }
    }

    if histogram {
        print!("{}", hist.report());
    }

    if processed_files == 0 {
        eprintln!(
            "Error: No files were successfully processed out of {} files found.",
            valid_paths.len()
        );
        std::process::exit(1);
    }

    Ok(())
}

fn print_summary(log: &FlightLog, filename: &str) {
    println!("{filename}");
    println!("  vendor: {}", log.vendor());
    match log.start_time() {
        Some(start) => println!("  start time: {}", start.format("%Y-%m-%d %H:%M:%S")),
        None => println!("  start time: unknown (GPS never got a fix)"),
    }
    println!("  columns: {}", log.columns().len());
    println!("  CHT columns: {:?}", log.cylinder_head_temp_columns());
    println!("  RPM column: {}", log.rpm_column());
}

fn dump_columns(log: &mut FlightLog, columns: &str) -> fdr_parser::Result<()> {
    let names: Vec<&str> = columns.split(',').map(|s| s.trim()).collect();
    let names: Vec<&str> = if names.is_empty() {
        vec![COLUMN_NAME_ELAPSED]
    } else {
        names
    };

    println!("{}", names.join("  "));
    let data = log.read(&names)?;
    let n_rows = data.first().map(|c| c.len()).unwrap_or(0);
    for r in 0..n_rows {
        let row: Vec<String> = data
            .iter()
            .map(|column| match &column[r] {
                Some(value) => value.to_string(),
                None => "-".to_string(),
            })
            .collect();
        println!("{}", row.join("  "));
    }
    Ok(())
}
