//! Convert per-record-type DNS CSV files into one JSON document.
//!
//! Rows are kept when their `enabled` column reads `yes`; the flag itself is
//! stripped from the output.

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod logging;
pub mod records;

pub use config::{Config, RecordType, RECORD_TYPES};
pub use convert::{convert, run};
pub use error::ConvertError;
pub use logging::Logger;
pub use records::{FilteredRow, RecordDocument};
