pub mod calendar;
pub mod config;
pub mod fetch;
pub mod process;
pub mod source;
pub mod store;

pub use process::record::{ExamRecord, RecordType};
pub use process::RawTable;
