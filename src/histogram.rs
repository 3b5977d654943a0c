//! Cylinder head temperature histogram.
//!
//! Tracks how much time cylinders spend in 10-degree temperature ranges
//! across one or more logs. Each cylinder counts independently, so the unit
//! is cylinder-seconds: six cylinders holding 345 degrees for ten seconds
//! add 60 to the 340-349 bucket.

use crate::error::Result;
use crate::parser::FlightLog;
use crate::types::{Value, COLUMN_NAME_ELAPSED};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Engine is considered off below this RPM; such rows count nothing.
const MIN_RUNNING_RPM: f64 = 500.0;

/// Round a temperature down to the nearest multiple of 10, floor of 0.
pub fn temperature_slot(temp: f64) -> i64 {
    if temp < 0.0 {
        return 0;
    }
    (temp / 10.0).floor() as i64 * 10
}

/// Accumulated cylinder-seconds keyed by temperature slot.
#[derive(Debug, Default)]
pub struct CylinderHistogram {
    slots: BTreeMap<i64, i64>,
}

impl CylinderHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Total cylinder-seconds across all slots.
    pub fn total_seconds(&self) -> i64 {
        self.slots.values().sum()
    }

    pub fn seconds_in_slot(&self, slot: i64) -> i64 {
        self.slots.get(&slot).copied().unwrap_or(0)
    }

    /// Accumulate one log's CHT data into the histogram.
    ///
    /// Logs without CHT columns (jets) contribute nothing. Rows where the
    /// engine is off (RPM absent or below 500) or where elapsed time is not
    /// yet known contribute zero seconds to every slot.
    pub fn accumulate(&mut self, log: &mut FlightLog) -> Result<()> {
        let cht_columns = log.cylinder_head_temp_columns().to_vec();
        if cht_columns.is_empty() {
            return Ok(());
        }

        let mut names: Vec<String> = vec![
            COLUMN_NAME_ELAPSED.to_string(),
            log.rpm_column().to_string(),
        ];
        names.extend(cht_columns);

        let data = log.read(&names)?;
        let n_rows = data[0].len();

        let mut prev_time = 0i64;
        for r in 0..n_rows {
            let rpm = data[1][r].as_ref().and_then(Value::as_f64);
            match rpm {
                None => continue,
                Some(rpm) if rpm < MIN_RUNNING_RPM => continue,
                Some(_) => {}
            }

            let Some(elapsed) = data[0][r].as_ref().and_then(Value::as_i64) else {
                continue;
            };
            let time_slice = elapsed - prev_time;
            prev_time = elapsed;

            for column in &data[2..] {
                if let Some(temp) = column[r].as_ref().and_then(Value::as_f64) {
                    *self.slots.entry(temperature_slot(temp)).or_insert(0) += time_slice;
                }
            }
        }

        Ok(())
    }

    /// Render the percentage table.
    ///
    /// Steps through the contiguous slot range from the minimum to the
    /// maximum observed slot, printing zero rows for gaps.
    pub fn report(&self) -> String {
        let mut out = String::new();
        if self.slots.is_empty() {
            out.push_str("No data\n");
            return out;
        }

        // BTreeMap keys are sorted, so the bounds are the first and last
        let min_slot = *self.slots.keys().next().unwrap();
        let max_slot = *self.slots.keys().next_back().unwrap();
        let total = self.total_seconds();

        out.push_str("CHT temp    pct  time (seconds)\n");
        for slot in (min_slot..=max_slot).step_by(10) {
            let label = format!("{}-{}", slot, slot + 9);
            let time = self.seconds_in_slot(slot);
            let pct = 100.0 * time as f64 / total as f64;
            let _ = writeln!(out, "{:>7}  {:6.2}  {}", label, pct, time);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_slot() {
        assert_eq!(temperature_slot(345.0), 340);
        assert_eq!(temperature_slot(9.0), 0);
        assert_eq!(temperature_slot(-5.0), 0);
        assert_eq!(temperature_slot(10.0), 10);
        assert_eq!(temperature_slot(0.0), 0);
        assert_eq!(temperature_slot(349.9), 340);
        assert_eq!(temperature_slot(350.0), 350);
    }

    #[test]
    fn test_empty_report() {
        let hist = CylinderHistogram::new();
        assert!(hist.is_empty());
        assert_eq!(hist.report(), "No data\n");
    }

    #[test]
    fn test_report_percentages_and_layout() {
        let mut hist = CylinderHistogram::new();
        for (slot, seconds) in [(240, 222), (250, 204), (260, 234), (270, 318), (280, 234), (290, 180)] {
            hist.slots.insert(slot, seconds);
        }
        assert_eq!(hist.total_seconds(), 1392);

        let report = hist.report();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "CHT temp    pct  time (seconds)");
        assert_eq!(lines[1], "240-249   15.95  222");
        assert_eq!(lines[4], "270-279   22.84  318");
        assert_eq!(lines.len(), 7);

        // percentages sum to 100 within rounding
        let pct_sum: f64 = lines[1..]
            .iter()
            .map(|line| line.split_whitespace().nth(1).unwrap().parse::<f64>().unwrap())
            .sum();
        assert!((pct_sum - 100.0).abs() < 0.05, "{pct_sum}");
    }

    #[test]
    fn test_report_fills_gaps_with_zero_rows() {
        let mut hist = CylinderHistogram::new();
        hist.slots.insert(300, 60);
        hist.slots.insert(330, 40);

        let report = hist.report();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "300-309   60.00  60");
        assert_eq!(lines[2], "310-319    0.00  0");
        assert_eq!(lines[3], "320-329    0.00  0");
        assert_eq!(lines[4], "330-339   40.00  40");
    }
}
