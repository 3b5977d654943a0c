use fdr_parser::{CylinderHistogram, FlightLog};
use std::io::Write;
use tempfile::NamedTempFile;

/// Integration tests for the CHT histogram client

fn write_log(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp log file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp log file");
    file
}

const SAMPLE: &str = "\
Avidyne Engine Data Log
1/10/07 17:37:44
TIME, LAT, LON, E1, C1, C2, RPM, MAP, FF
17:37:42, 1.0, 2.0, 1100, 305, 312, 2450, 22.0, 14.0
17:37:48, 1.0, 2.0, 1100, 306, 341, 2450, 22.0, 14.0
17:37:54, 1.0, 2.0, 1100, 290, 345, 400, 22.0, 14.0
17:38:00, 1.0, 2.0, 1100, 310, 350, 2450, 22.0, 14.0
";

#[test]
fn test_accumulate_single_log() {
    let file = write_log(SAMPLE);
    let mut log = FlightLog::open(file.path()).unwrap();

    let mut hist = CylinderHistogram::new();
    hist.accumulate(&mut log).unwrap();

    // row 0: elapsed 0, slice 0
    // row 1: slice 6 -> C1 306 (300s), C2 341 (340s)
    // row 2: engine off (RPM 400), contributes nothing
    // row 3: slice 12 -> C1 310 (310s), C2 350 (350s)
    assert_eq!(hist.seconds_in_slot(300), 6);
    assert_eq!(hist.seconds_in_slot(310), 12);
    assert_eq!(hist.seconds_in_slot(340), 6);
    assert_eq!(hist.seconds_in_slot(350), 12);
    assert_eq!(hist.total_seconds(), 36);
}

#[test]
fn test_total_equals_sum_of_counted_time_slices() {
    let file = write_log(SAMPLE);
    let mut log = FlightLog::open(file.path()).unwrap();

    let mut hist = CylinderHistogram::new();
    hist.accumulate(&mut log).unwrap();

    // two counted rows with a 2-cylinder engine: (6 + 12) * 2
    assert_eq!(hist.total_seconds(), 36);
}

#[test]
fn test_accumulate_across_files() {
    let file = write_log(SAMPLE);

    let mut hist = CylinderHistogram::new();
    for _ in 0..2 {
        let mut log = FlightLog::open(file.path()).unwrap();
        hist.accumulate(&mut log).unwrap();
    }
    assert_eq!(hist.total_seconds(), 72);
    assert_eq!(hist.seconds_in_slot(300), 12);
}

#[test]
fn test_jet_log_contributes_nothing() {
    // an SF50 logs no cylinder head temperatures
    let file = write_log(
        "\
#airframe_info, log_version=\"1.00\", airframe_name=\"Cirrus SF50\"
#yyy-mm-dd, hh:mm:ss, degrees, gph, 1=on
Lcl Date, Lcl Time, Latitude, E1 FFlow, AfcsOn
2016-11-19, 15:46:19, 24.55530, 52.0, 1
",
    );
    let mut log = FlightLog::open(file.path()).unwrap();
    assert!(log.cylinder_head_temp_columns().is_empty());

    let mut hist = CylinderHistogram::new();
    hist.accumulate(&mut log).unwrap();
    assert!(hist.is_empty());
    assert_eq!(hist.report(), "No data\n");
}

#[test]
fn test_absent_rpm_rows_count_nothing() {
    let file = write_log(
        "\
Avidyne Engine Data Log
1/10/07 17:37:44
TIME, LAT, LON, E1, C1, RPM, MAP, FF
17:37:42, 1.0, 2.0, 1100, 305, , 22.0, 14.0
17:37:48, 1.0, 2.0, 1100, 306, , 22.0, 14.0
",
    );
    let mut log = FlightLog::open(file.path()).unwrap();

    let mut hist = CylinderHistogram::new();
    hist.accumulate(&mut log).unwrap();
    assert!(hist.is_empty());
}

#[test]
fn test_report_format() {
    let file = write_log(SAMPLE);
    let mut log = FlightLog::open(file.path()).unwrap();

    let mut hist = CylinderHistogram::new();
    hist.accumulate(&mut log).unwrap();

    let report = hist.report();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines[0], "CHT temp    pct  time (seconds)");
    // contiguous slot range 300..=350 with zero-filled gaps
    assert_eq!(lines.len(), 1 + 6);
    assert_eq!(lines[1], "300-309   16.67  6");
    assert_eq!(lines[3], "320-329    0.00  0");
    assert_eq!(lines[6], "350-359   33.33  12");
}
