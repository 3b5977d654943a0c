//! The flight log handle: format detection, column binding, and the
//! column-major data reader.

use crate::error::{FdrError, Result};
use crate::parser::helpers::{read_line_latin1, skip_line};
use crate::parser::reader::{AvidyneTime, ColumnReader, GarminTime};
use crate::parser::{avidyne, garmin};
use crate::schema;
use crate::types::{ColumnDef, ColumnType, Value, Vendor, COLUMN_NAME_ELAPSED, COLUMN_NAME_TIMESTAMP};
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Both vendors put exactly three header lines before the data rows.
const HEADER_LINE_COUNT: usize = 3;

/// An opened Avidyne or Garmin flight log.
///
/// Created by [`FlightLog::open`], which detects the vendor from the first
/// line, binds the file's header row against the vendor's column catalog,
/// and resolves the log's start time. The handle owns the open file for its
/// lifetime; [`FlightLog::read`] rewinds and re-scans it, which is why it
/// takes `&mut self`: one handle cannot serve concurrent reads, but
/// distinct handles are fully independent.
#[derive(Debug)]
pub struct FlightLog {
    pub(crate) path: PathBuf,
    pub(crate) file: BufReader<File>,
    pub(crate) vendor: Vendor,
    /// Bound definitions for the file's actual columns, in file order.
    pub(crate) columns: Vec<ColumnDef>,
    /// Header name to physical column index.
    pub(crate) column_idx: HashMap<String, usize>,
    /// First resolvable timestamp in the log. `None` only for Garmin files
    /// where no row ever carried a complete date (GPS never got a fix).
    pub(crate) start_time: Option<NaiveDateTime>,
    /// Cylinder head temperature columns, discovered at open time.
    pub(crate) cht_columns: Vec<String>,
    /// RPM columns for all engines, discovered at open time.
    pub(crate) rpm_all_engines: Vec<String>,
}

impl FlightLog {
    /// Open a flight log, detecting the vendor from the first line.
    ///
    /// Fails with [`FdrError::Format`] when no vendor signature matches or
    /// when the matched vendor's required columns are missing. The file is
    /// closed on every failure path.
    pub fn open(path: impl AsRef<Path>) -> Result<FlightLog> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        let mut reader = BufReader::new(file);

        // only the first line decides the vendor
        let first_line = read_line_latin1(&mut reader)?.unwrap_or_default();

        let log = if avidyne::matches_signature(&first_line) {
            avidyne::bind(path, reader)?
        } else if garmin::matches_signature(&first_line) {
            garmin::bind(path, reader)?
        } else {
            return Err(FdrError::Format("unrecognized file format".to_string()));
        };

        // the vendor binders must have bound at least the required columns
        assert!(!log.columns.is_empty() && !log.column_idx.is_empty());
        Ok(log)
    }

    pub fn vendor(&self) -> Vendor {
        self.vendor
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bound column definitions in file order.
    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Physical index of a header name, if present in the file.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.column_idx.get(name).copied()
    }

    /// First resolvable timestamp of the log.
    pub fn start_time(&self) -> Option<NaiveDateTime> {
        self.start_time
    }

    /// Cylinder head temperature column names, in file order.
    ///
    /// Empty when the airframe has no piston-cylinder sensors, e.g. a jet.
    pub fn cylinder_head_temp_columns(&self) -> &[String] {
        &self.cht_columns
    }

    /// Name of the primary engine RPM column.
    pub fn rpm_column(&self) -> &'static str {
        match self.vendor {
            Vendor::Avidyne => "RPM",
            Vendor::Garmin => "E1 RPM",
        }
    }

    /// RPM column names for all engines, in file order.
    pub fn rpm_columns_all_engines(&self) -> &[String] {
        &self.rpm_all_engines
    }

    pub fn latitude_column(&self) -> Option<&'static str> {
        match self.vendor {
            Vendor::Avidyne => Some("LAT"),
            Vendor::Garmin => Some("Latitude"),
        }
    }

    pub fn longitude_column(&self) -> Option<&'static str> {
        match self.vendor {
            Vendor::Avidyne => Some("LON"),
            Vendor::Garmin => Some("Longitude"),
        }
    }

    /// Read the requested columns, returning them column-major: one sequence
    /// per requested name, all of equal length, aligned by row index.
    ///
    /// Requested names may include the virtual columns
    /// [`COLUMN_NAME_TIMESTAMP`] and [`COLUMN_NAME_ELAPSED`]; any other name
    /// must exist in the file or the call fails with
    /// [`FdrError::ColumnNotFound`].
    ///
    /// Rows narrower than the widest requested column are dropped silently
    /// as trailing truncation. A row that is malformed beyond an absent
    /// value stops the scan: the error is logged with its line number and
    /// the rows accumulated so far are returned.
    pub fn read<S: AsRef<str>>(&mut self, requested: &[S]) -> Result<Vec<Vec<Option<Value>>>> {
        let mut readers = Vec::with_capacity(requested.len());
        let mut min_width = 0;

        for name in requested {
            let name = name.as_ref();
            let reader = match name {
                COLUMN_NAME_TIMESTAMP => self.timestamp_reader()?,
                COLUMN_NAME_ELAPSED => self.elapsed_reader()?,
                _ => {
                    let index = self
                        .column_index(name)
                        .ok_or_else(|| FdrError::ColumnNotFound(name.to_string()))?;
                    ColumnReader::passthrough(self.columns[index].clone(), index)
                }
            };
            min_width = min_width.max(reader.min_row_width());
            readers.push(reader);
        }

        let mut result: Vec<Vec<Option<Value>>> = vec![Vec::new(); readers.len()];

        // rewind and skip the header lines; they were validated at open time
        self.file.seek(SeekFrom::Start(0))?;
        for _ in 0..HEADER_LINE_COUNT {
            skip_line(&mut self.file)?;
        }

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(&mut self.file);

        let mut line_no = HEADER_LINE_COUNT;
        let mut row = Vec::with_capacity(readers.len());

        for record in csv_reader.byte_records() {
            line_no += 1;
            let record = match record {
                Ok(record) => record,
                Err(err) => {
                    warn!("error reading {}, line {}: {}", self.path.display(), line_no, err);
                    return Ok(result);
                }
            };

            // short row, probably a truncated tail; skip it
            if record.len() < min_width {
                continue;
            }

            row.clear();
            for reader in &readers {
                match reader.read(&record) {
                    Ok(value) => row.push(value),
                    Err(err) => {
                        warn!(
                            "error reading {}, line {}: {}",
                            self.path.display(),
                            line_no,
                            err
                        );
                        return Ok(result);
                    }
                }
            }
            for (column, value) in result.iter_mut().zip(row.drain(..)) {
                column.push(value);
            }
        }

        Ok(result)
    }

    fn timestamp_reader(&self) -> Result<ColumnReader> {
        match self.vendor {
            Vendor::Avidyne => Ok(ColumnReader::AvidyneTimestamp(self.avidyne_time()?)),
            Vendor::Garmin => Ok(ColumnReader::GarminTimestamp(self.garmin_time()?)),
        }
    }

    fn elapsed_reader(&self) -> Result<ColumnReader> {
        match self.vendor {
            Vendor::Avidyne => Ok(ColumnReader::AvidyneElapsed(self.avidyne_time()?)),
            Vendor::Garmin => Ok(ColumnReader::GarminElapsed {
                time: self.garmin_time()?,
                start: self.start_time,
            }),
        }
    }

    fn avidyne_time(&self) -> Result<AvidyneTime> {
        let time_index = self
            .column_index("TIME")
            .ok_or_else(|| FdrError::Format("Avidyne log missing \"TIME\" column".to_string()))?;
        let start = self
            .start_time
            .ok_or_else(|| FdrError::Format("Avidyne log start time unresolved".to_string()))?;
        Ok(AvidyneTime { start, time_index })
    }

    fn garmin_time(&self) -> Result<GarminTime> {
        let date_index = self.column_index("Lcl Date").ok_or_else(|| {
            FdrError::Format("Garmin log missing \"Lcl Date\" column".to_string())
        })?;
        let time_index = self.column_index("Lcl Time").ok_or_else(|| {
            FdrError::Format("Garmin log missing \"Lcl Time\" column".to_string())
        })?;
        Ok(GarminTime {
            date_index,
            time_index,
        })
    }
}

/// Bind a file's header names against a vendor catalog.
///
/// Names outside the catalog become text passthrough columns. The returned
/// index maps each header name to its position; a duplicated header name
/// keeps the last position, matching the column list order otherwise.
pub(crate) fn bind_columns(
    column_names: &[String],
    catalog: &[(&str, ColumnType)],
) -> (Vec<ColumnDef>, HashMap<String, usize>) {
    let columns = column_names
        .iter()
        .map(|name| schema::lookup(catalog, name).unwrap_or_else(|| ColumnDef::text(name.clone())))
        .collect();
    let column_idx = column_names
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), i))
        .collect();
    (columns, column_idx)
}
