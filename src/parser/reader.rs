//! Per-column value extractors.
//!
//! A `ColumnReader` turns one raw CSV record into one output value. Physical
//! columns use a passthrough reader driven by the bound `ColumnDef`; the
//! virtual "timestamp" and "elapsed" columns use vendor-specific readers with
//! their own time arithmetic.
//!
//! Readers distinguish two failure shapes: an expected absent value (blank or
//! late GPS fix, sensor dropout, malformed time-of-day string) comes back as
//! `Ok(None)`, while a genuinely malformed row (time components out of range)
//! is a hard `Err` that makes the data reader stop streaming.

use crate::error::{FdrError, Result};
use crate::parser::helpers::{int_fields, latin1_to_string};
use crate::types::{ColumnDef, Value};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use csv::ByteRecord;

/// Reader for one requested output column.
#[derive(Debug, Clone)]
pub enum ColumnReader {
    /// Extracts one physical field by index and applies its parse rule.
    Passthrough { def: ColumnDef, index: usize },
    /// Computed absolute timestamp for Avidyne logs.
    AvidyneTimestamp(AvidyneTime),
    /// Computed seconds-since-start for Avidyne logs.
    AvidyneElapsed(AvidyneTime),
    /// Computed absolute timestamp for Garmin logs.
    GarminTimestamp(GarminTime),
    /// Computed seconds-since-start for Garmin logs.
    GarminElapsed {
        time: GarminTime,
        /// Undefined when no row in the file ever carried a complete date.
        start: Option<NaiveDateTime>,
    },
}

impl ColumnReader {
    pub fn passthrough(def: ColumnDef, index: usize) -> Self {
        ColumnReader::Passthrough { def, index }
    }

    /// Read this column's value from one raw record.
    pub fn read(&self, record: &ByteRecord) -> Result<Option<Value>> {
        match self {
            ColumnReader::Passthrough { def, index } => {
                let raw = record.get(*index).map(latin1_to_string).unwrap_or_default();
                Ok(def.parse(&raw))
            }
            ColumnReader::AvidyneTimestamp(time) => {
                Ok(time.timestamp(record)?.map(Value::Timestamp))
            }
            ColumnReader::AvidyneElapsed(time) => {
                let elapsed = time
                    .timestamp(record)?
                    .map(|ts| (ts - time.start).num_seconds());
                Ok(elapsed.map(Value::Integer))
            }
            ColumnReader::GarminTimestamp(time) => {
                Ok(time.timestamp(record)?.map(Value::Timestamp))
            }
            ColumnReader::GarminElapsed { time, start } => {
                let Some(start) = start else {
                    // GPS never got a fix; elapsed is unknowable for every row
                    return Ok(None);
                };
                let elapsed = time
                    .timestamp(record)?
                    .map(|ts| (ts - *start).num_seconds());
                Ok(elapsed.map(Value::Integer))
            }
        }
    }

    /// Minimum record width this reader needs, one past the highest physical
    /// index it touches. Rows narrower than this are trailing truncation.
    pub fn min_row_width(&self) -> usize {
        1 + match self {
            ColumnReader::Passthrough { index, .. } => *index,
            ColumnReader::AvidyneTimestamp(time) | ColumnReader::AvidyneElapsed(time) => {
                time.time_index
            }
            ColumnReader::GarminTimestamp(time) | ColumnReader::GarminElapsed { time, .. } => {
                time.date_index.max(time.time_index)
            }
        }
    }
}

/// Shared state for the Avidyne computed time readers.
///
/// Avidyne rows carry only a time of day, so the start date is cached from
/// the header and a row whose time of day precedes the start time is assumed
/// to have crossed midnight.
#[derive(Debug, Clone)]
pub struct AvidyneTime {
    pub start: NaiveDateTime,
    pub time_index: usize,
}

impl AvidyneTime {
    fn timestamp(&self, record: &ByteRecord) -> Result<Option<NaiveDateTime>> {
        let raw = record
            .get(self.time_index)
            .map(latin1_to_string)
            .unwrap_or_default();
        let hms = int_fields(&raw);
        if hms.len() != 3 {
            return Ok(None);
        }
        let time = NaiveTime::from_hms_opt(hms[0], hms[1], hms[2])
            .ok_or_else(|| FdrError::Parse(format!("invalid time of day: {:?}", raw.trim())))?;
        let mut timestamp = self.start.date().and_time(time);
        if timestamp < self.start {
            timestamp = timestamp + Duration::days(1);
        }
        Ok(Some(timestamp))
    }
}

/// Shared state for the Garmin computed time readers.
///
/// Garmin rows carry a full date and time, and dates can blank out briefly
/// mid-file, so both fields are parsed fresh from every row.
#[derive(Debug, Clone)]
pub struct GarminTime {
    pub date_index: usize,
    pub time_index: usize,
}

impl GarminTime {
    fn timestamp(&self, record: &ByteRecord) -> Result<Option<NaiveDateTime>> {
        let raw_date = record
            .get(self.date_index)
            .map(latin1_to_string)
            .unwrap_or_default();
        let ymd = int_fields(&raw_date);
        if ymd.len() != 3 {
            return Ok(None);
        }
        let raw_time = record
            .get(self.time_index)
            .map(latin1_to_string)
            .unwrap_or_default();
        let hms = int_fields(&raw_time);
        if hms.len() != 3 {
            return Ok(None);
        }
        let date = NaiveDate::from_ymd_opt(ymd[0] as i32, ymd[1], ymd[2])
            .ok_or_else(|| FdrError::Parse(format!("invalid date: {:?}", raw_date.trim())))?;
        let time = NaiveTime::from_hms_opt(hms[0], hms[1], hms[2])
            .ok_or_else(|| FdrError::Parse(format!("invalid time of day: {:?}", raw_time.trim())))?;
        Ok(Some(date.and_time(time)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColumnType;

    fn record(fields: &[&str]) -> ByteRecord {
        let mut rec = ByteRecord::new();
        for f in fields {
            rec.push_field(f.as_bytes());
        }
        rec
    }

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_passthrough_reader() {
        let reader =
            ColumnReader::passthrough(ColumnDef::new("RPM", ColumnType::Integer), 1);
        assert_eq!(
            reader.read(&record(&["x", "2450"])).unwrap(),
            Some(Value::Integer(2450))
        );
        assert_eq!(reader.read(&record(&["x", ""])).unwrap(), None);
        assert_eq!(reader.min_row_width(), 2);
    }

    #[test]
    fn test_avidyne_timestamp_same_day() {
        let time = AvidyneTime {
            start: dt(2016, 11, 19, 15, 46, 18),
            time_index: 0,
        };
        let reader = ColumnReader::AvidyneTimestamp(time);
        let value = reader.read(&record(&["15:46:24"])).unwrap().unwrap();
        assert_eq!(value, Value::Timestamp(dt(2016, 11, 19, 15, 46, 24)));
    }

    #[test]
    fn test_avidyne_day_wrap() {
        let time = AvidyneTime {
            start: dt(2016, 11, 19, 23, 59, 58),
            time_index: 0,
        };
        let ts_reader = ColumnReader::AvidyneTimestamp(time.clone());
        let value = ts_reader.read(&record(&["00:00:02"])).unwrap().unwrap();
        assert_eq!(value, Value::Timestamp(dt(2016, 11, 20, 0, 0, 2)));

        let elapsed_reader = ColumnReader::AvidyneElapsed(time);
        let value = elapsed_reader.read(&record(&["00:00:02"])).unwrap().unwrap();
        assert_eq!(value, Value::Integer(4));
    }

    #[test]
    fn test_avidyne_malformed_time_is_absent() {
        let time = AvidyneTime {
            start: dt(2016, 11, 19, 15, 46, 18),
            time_index: 0,
        };
        let reader = ColumnReader::AvidyneElapsed(time);
        assert_eq!(reader.read(&record(&[""])).unwrap(), None);
        assert_eq!(reader.read(&record(&["15:46"])).unwrap(), None);
    }

    #[test]
    fn test_avidyne_out_of_range_time_is_hard_failure() {
        let time = AvidyneTime {
            start: dt(2016, 11, 19, 15, 46, 18),
            time_index: 0,
        };
        let reader = ColumnReader::AvidyneTimestamp(time);
        assert!(reader.read(&record(&["25:99:99"])).is_err());
    }

    #[test]
    fn test_garmin_timestamp_and_elapsed() {
        let time = GarminTime {
            date_index: 0,
            time_index: 1,
        };
        let reader = ColumnReader::GarminTimestamp(time.clone());
        let value = reader
            .read(&record(&["2016-11-19", "15:46:19"]))
            .unwrap()
            .unwrap();
        assert_eq!(value, Value::Timestamp(dt(2016, 11, 19, 15, 46, 19)));

        let reader = ColumnReader::GarminElapsed {
            time,
            start: Some(dt(2016, 11, 19, 15, 46, 19)),
        };
        let value = reader
            .read(&record(&["2016-11-19", "15:46:29"]))
            .unwrap()
            .unwrap();
        assert_eq!(value, Value::Integer(10));
    }

    #[test]
    fn test_garmin_blank_date_is_absent() {
        let time = GarminTime {
            date_index: 0,
            time_index: 1,
        };
        let reader = ColumnReader::GarminTimestamp(time);
        assert_eq!(reader.read(&record(&["", "15:46:19"])).unwrap(), None);
        assert_eq!(reader.read(&record(&["2016-11", "15:46:19"])).unwrap(), None);
    }

    #[test]
    fn test_garmin_elapsed_without_start_is_always_absent() {
        let reader = ColumnReader::GarminElapsed {
            time: GarminTime {
                date_index: 0,
                time_index: 1,
            },
            start: None,
        };
        assert_eq!(
            reader.read(&record(&["2016-11-19", "15:46:19"])).unwrap(),
            None
        );
        assert_eq!(reader.min_row_width(), 2);
    }
}
