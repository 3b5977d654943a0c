//! Avidyne engine log binding.
//!
//! Header shape: line 1 is the signature, line 2 is six integers giving a
//! reference timestamp (`M D YY H M S`), line 3 is the comma-separated
//! header row, line 4 onward is data. The recorder logs once every six
//! seconds, so the first data row's time is the line 2 reference time
//! rounded down to a 6-second boundary. The start time combines the date
//! from line 2 with the time of day from the first data row's TIME field.

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

const SIGNATURE: &str = "Avidyne Engine Data Log";

static CHT_RE: OnceLock<Regex> = OnceLock::new();

pub(crate) fn matches_signature(line: &str) -> bool {
    line.starts_with(SIGNATURE)
}

/// Bind an Avidyne log whose signature already matched.
pub(crate) fn bind(path: PathBuf, mut file: BufReader<File>) -> Result<FlightLog> {
    file.seek(SeekFrom::Start(0))?;
    skip_line(&mut file)?; // signature line, already checked

    let date_line = read_line_latin1(&mut file)?
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

    // the first data row is needed to resolve the start time
    let first_row = match records.next() {
        Some(record) => record?,
        None => return Err(FdrError::Format("file is empty".to_string())),
    };
    drop(records);
    drop(csv_reader);

    let (columns, column_idx) = bind_columns(&column_names, schema::AVIDYNE_COLUMNS);
    for name in schema::AVIDYNE_REQUIRED_COLUMNS {
        if !column_idx.contains_key(*name) {
            return Err(FdrError::Format(format!(
                "log appears to be in Avidyne format, but is missing expected column {:?}",
                name
            )));
        }
    }

    let time_index = column_idx["TIME"];
    let start_time = compute_start_time(&date_line, &first_row, time_index)?;

    // CHT columns are "C" plus a cylinder digit; engines with fewer than six
    // cylinders simply have fewer of them
    let cht_re = CHT_RE.get_or_init(|| Regex::new(r"^C\d").expect("CHT column pattern"));
    let cht_columns = column_names
        .iter()
        .filter(|name| cht_re.is_match(name))
        .cloned()
        .collect();

    Ok(FlightLog {
        path,
        file,
        vendor: Vendor::Avidyne,
        columns,
        column_idx,
        start_time: Some(start_time),
        cht_columns,
        // single-engine assumption for Avidyne
        rpm_all_engines: vec!["RPM".to_string()],
    })
}

/// Combine the date from line 2 with the time of day from the first data
/// row's TIME field.
///
/// Line 2 might read `1/10/07 17:37:44` while the first data row starts at
/// `17:37:42`, the reference time rounded down to the 6-second logging
/// boundary.
fn compute_start_time(
    date_line: &str,
    first_row: &ByteRecord,
    time_index: usize,
) -> Result<NaiveDateTime> {
    let fields = int_fields(date_line);
    if fields.len() != 6 {
        return Err(FdrError::Format(format!(
            "malformed Avidyne date line: {:?}",
            date_line.trim()
        )));
    }
    // month/day/year order
    let (month, day, mut year) = (fields[0], fields[1], fields[2] as i32);

    // Avidyne logs use 2-digit years; assume 70-99 is the 20th century. A
    // larger value would mean they switched to 4-digit years.
    if year >= 70 {
        if year > 99 {
            return Err(FdrError::Format(format!(
                "unexpected year > 99: {:?}",
                date_line.trim()
            )));
        }
        year += 1900;
    } else {
        year += 2000;
    }

    let raw_time = first_row
        .get(time_index)
        .map(latin1_to_string)
        .unwrap_or_default();
    let hms = int_fields(&raw_time);
    if hms.len() != 3 {
        return Err(FdrError::Format(format!(
            "malformed TIME field in first data row: {:?}",
            raw_time.trim()
        )));
    }

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| FdrError::Format(format!("invalid date: {:?}", date_line.trim())))?;
    let time = NaiveTime::from_hms_opt(hms[0], hms[1], hms[2])
        .ok_or_else(|| FdrError::Format(format!("invalid time of day: {:?}", raw_time.trim())))?;
    Ok(date.and_time(time))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[&str]) -> ByteRecord {
        let mut rec = ByteRecord::new();
        for f in fields {
            rec.push_field(f.as_bytes());
        }
        rec
    }

    #[test]
    fn test_signature() {
        assert!(matches_signature("Avidyne Engine Data Log - (c) Avidyne Corporation\n"));
        assert!(!matches_signature("#airframe_info, log_version=\"1.00\""));
        assert!(!matches_signature(""));
    }

    #[test]
    fn test_start_time_uses_first_row_time() {
        let start =
            compute_start_time("11/19/16 15:46:22", &record(&["15:46:18", "24.5"]), 0).unwrap();
        let expected = NaiveDate::from_ymd_opt(2016, 11, 19)
            .unwrap()
            .and_hms_opt(15, 46, 18)
            .unwrap();
        assert_eq!(start, expected);
    }

    #[test]
    fn test_two_digit_year_rule() {
        let start = compute_start_time("1/10/07 17:37:44", &record(&["17:37:42"]), 0).unwrap();
        assert_eq!(start.date(), NaiveDate::from_ymd_opt(2007, 1, 10).unwrap());

        let start = compute_start_time("1/10/98 17:37:44", &record(&["17:37:42"]), 0).unwrap();
        assert_eq!(start.date(), NaiveDate::from_ymd_opt(1998, 1, 10).unwrap());
    }

    #[test]
    fn test_four_digit_year_rejected() {
        assert!(compute_start_time("1/10/1998 17:37:44", &record(&["17:37:42"]), 0).is_err());
    }

    #[test]
    fn test_malformed_date_line_rejected() {
        assert!(compute_start_time("", &record(&["17:37:42"]), 0).is_err());
        assert!(compute_start_time("1/10/07 17:37", &record(&["17:37:42"]), 0).is_err());
    }

    #[test]
    fn test_malformed_first_row_time_rejected() {
        assert!(compute_start_time("1/10/07 17:37:44", &record(&[""]), 0).is_err());
    }
}
