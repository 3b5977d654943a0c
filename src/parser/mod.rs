pub mod avidyne;
pub mod garmin;
pub mod helpers;
pub mod log;
pub mod reader;

pub use log::FlightLog;
pub use reader::ColumnReader;
