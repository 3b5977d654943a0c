pub mod column;
pub mod log;

pub use column::{ColumnDef, ColumnType, Value};
pub use log::{Vendor, COLUMN_NAME_ELAPSED, COLUMN_NAME_TIMESTAMP};
