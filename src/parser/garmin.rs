//! Garmin log binding.
//!
//! Header shape: line 1 is the signature, line 2 is a units row (ignored),
//! line 3 is the header row, line 4 onward is data. Garmin files often start
//! with blank dates and positions until the GPS gets a fix, so the start
//! time is resolved by scanning forward to the first row with a complete
//! date. A file where that never happens has an undefined start time, which
//! is a valid state, not an error.

use crate::error::{FdrError, Result};
use crate::parser::helpers::{int_fields, latin1_to_string, read_line_latin1, skip_line};
use crate::parser::log::{bind_columns, FlightLog};
use crate::schema;
use crate::types::Vendor;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use csv::ByteRecord;
use regex::Regex;
use std::fs::File;
use std::io::{BufReader, Seek, SeekFrom};
use std::path::PathBuf;
use std::sync::OnceLock;

const SIGNATURE: &str = "#airframe_info, log_version=\"1.0";

static CHT_RE: OnceLock<Regex> = OnceLock::new();
static RPM_RE: OnceLock<Regex> = OnceLock::new();

pub(crate) fn matches_signature(line: &str) -> bool {
    line.starts_with(SIGNATURE)
}

/// Bind a Garmin log whose signature already matched.
pub(crate) fn bind(path: PathBuf, mut file: BufReader<File>) -> Result<FlightLog> {
    file.seek(SeekFrom::Start(0))?;
    skip_line(&mut file)?; // signature line, already checked

    // units row, one entry per column; not needed
    read_line_latin1(&mut file)?
        .ok_or_else(|| FdrError::Format("file is empty".to_string()))?;

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(&mut file);
    let mut records = csv_reader.byte_records();

    let header_row = match records.next() {
        Some(record) => record?,
        None => return Err(FdrError::Format("file is empty".to_string())),
    };
    let column_names: Vec<String> = header_row
        .iter()
        .map(|field| latin1_to_string(field).trim().to_string())
        .collect();

    let (columns, column_idx) = bind_columns(&column_names, schema::GARMIN_COLUMNS);
    for name in schema::GARMIN_REQUIRED_COLUMNS {
        if !column_idx.contains_key(*name) {
            return Err(FdrError::Format(format!(
                "log appears to be in Garmin format, but is missing expected column {:?}",
                name
            )));
        }
    }

    let date_index = column_idx["Lcl Date"];
    let time_index = column_idx.get("Lcl Time").copied();
    let start_time = resolve_start_time(records, date_index, time_index)?;
    drop(csv_reader);

    let cht_re = CHT_RE.get_or_init(|| Regex::new(r"^E\d CHT\d").expect("CHT column pattern"));
    let cht_columns = column_names
        .iter()
        .filter(|name| cht_re.is_match(name))
        .cloned()
        .collect();

    let rpm_re = RPM_RE.get_or_init(|| Regex::new(r"^E\d RPM").expect("RPM column pattern"));
    let rpm_all_engines = column_names
        .iter()
        .filter(|name| rpm_re.is_match(name))
        .cloned()
        .collect();

    Ok(FlightLog {
        path,
        file,
        vendor: Vendor::Garmin,
        columns,
        column_idx,
        start_time,
        cht_columns,
        rpm_all_engines,
    })
}

/// Scan forward to the first row whose date field parses as exactly three
/// integers and combine it with that row's time field.
///
/// Returns `None` when no row in the entire file has a complete date, for
/// example when the power was only on briefly in a hangar and the GPS never
/// got a fix.
fn resolve_start_time<I>(
    records: I,
    date_index: usize,
    time_index: Option<usize>,
) -> Result<Option<NaiveDateTime>>
where
    I: Iterator<Item = csv::Result<ByteRecord>>,
{
    // without a time column no timestamp can ever be formed
    let Some(time_index) = time_index else {
        return Ok(None);
    };

    for record in records {
        let record = record?;
        let raw_date = record
            .get(date_index)
            .map(latin1_to_string)
            .unwrap_or_default();
        let ymd = int_fields(&raw_date);
        if ymd.len() != 3 {
            continue;
        }

        let raw_time = record
            .get(time_index)
            .map(latin1_to_string)
            .unwrap_or_default();
        let hms = int_fields(&raw_time);
        if hms.len() != 3 {
            return Err(FdrError::Format(format!(
                "malformed time field on first dated row: {:?}",
                raw_time.trim()
            )));
        }

        let date = NaiveDate::from_ymd_opt(ymd[0] as i32, ymd[1], ymd[2])
            .ok_or_else(|| FdrError::Format(format!("invalid date: {:?}", raw_date.trim())))?;
        let time = NaiveTime::from_hms_opt(hms[0], hms[1], hms[2]).ok_or_else(|| {
            FdrError::Format(format!("invalid time of day: {:?}", raw_time.trim()))
        })?;
        return Ok(Some(date.and_time(time)));
    }

    Ok(None)
}
