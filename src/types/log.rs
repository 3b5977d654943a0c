use std::fmt;

/// Name of the virtual column carrying absolute timestamps.
pub const COLUMN_NAME_TIMESTAMP: &str = "timestamp";

/// Name of the virtual column carrying whole seconds since the log start.
pub const COLUMN_NAME_ELAPSED: &str = "elapsed";

/// The avionics vendor that produced a log file.
///
/// This is a closed set: format detection only knows these two dialects and
/// everything vendor-specific dispatches on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    Avidyne,
    Garmin,
}

impl Vendor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vendor::Avidyne => "avidyne",
            Vendor::Garmin => "garmin",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
