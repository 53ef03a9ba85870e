//! I/O module
//!
//! Handles CSV parsing and output, plus loading of the reference data files.
//!
//! # Components
//!
//! - `csv_format` - Quote CSV format handling (record conversion, output serialization)
//! - `sync_reader` - Synchronous CSV reader with iterator interface
//! - `async_reader` - Asynchronous CSV reader with batch reading interface
//! - `config_loader` - Discount catalog and refund schedule loading

pub mod async_reader;
pub mod config_loader;
pub mod csv_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use config_loader::{
    builtin_catalog, builtin_refund_schedule, read_catalog, read_refund_schedule,
    read_refund_schedule_file,
};
pub use csv_format::{convert_csv_record, write_quotes_csv, QuoteCsvRecord};
pub use sync_reader::SyncReader;
