//! FDR Parser Library
//!
//! A Rust library for parsing Avidyne and Garmin flight data recorder CSV
//! logs. The two vendors use incompatible on-disk schemas, with different
//! column names, header layouts, and time encodings; this library exposes both
//! behind one column-oriented read interface with vendor-independent virtual
//! time columns.
//!
//! # Quick Start
//!
//! Open a log file and read some columns:
//! ```rust,no_run
//! use fdr_parser::FlightLog;
//!
//! let mut log = FlightLog::open("log_161119_154619_KEYW.csv").unwrap();
//! println!("vendor: {}", log.vendor());
//!
//! let lat = log.latitude_column().unwrap();
//! let data = log.read(&["elapsed", lat]).unwrap();
//! println!("{} rows", data[0].len());
//! ```
//!
//! The result is column-major: `data[k]` holds every value of the k-th
//! requested column, and absent values (sensor dropout, GPS not yet fixed)
//! are `None`.
//!
//! Column names differ per vendor, so the handle provides accessors for the
//! common ones: [`FlightLog::latitude_column`], [`FlightLog::rpm_column`],
//! [`FlightLog::cylinder_head_temp_columns`]. Two virtual columns are
//! available from [`FlightLog::read`] for either vendor: `"timestamp"` (an
//! absolute point in time) and `"elapsed"` (whole seconds since the first
//! resolvable timestamp in the log).
//!
//! # Corruption tolerance
//!
//! Real recorder files end abruptly, start before the GPS has a fix, and
//! blank out fields mid-flight. Opening fails only for structural problems
//! (unknown signature, missing required columns, no header at all); once a
//! handle exists, `read` never fails on row data: truncated trailing rows
//! are dropped, unparseable fields become `None`, and a genuinely malformed
//! row ends the scan early with a logged line number and a partial result.
//!
//! # Public API
//!
//! ## Parsing
//! - [`FlightLog`] - opened log handle: vendor detection, column binding, `read`
//! - [`Vendor`] - the closed set of supported vendors
//! - [`Value`] / [`ColumnDef`] / [`ColumnType`] - parsed cells and column schema
//!
//! ## Histogram client
//! - [`CylinderHistogram`] - cylinder-seconds per 10-degree CHT range
//! - [`temperature_slot`] - bucket math

// Module declarations
pub mod error;
pub mod histogram;
pub mod parser;
pub mod schema;
pub mod types;

// Re-export everything from modules for convenience
pub use error::{FdrError, Result};
pub use histogram::{temperature_slot, CylinderHistogram};
pub use parser::{ColumnReader, FlightLog};
pub use types::{ColumnDef, ColumnType, Value, Vendor, COLUMN_NAME_ELAPSED, COLUMN_NAME_TIMESTAMP};
