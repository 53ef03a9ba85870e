//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over quote requests from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<QuoteRecord, PricingError>` for each CSV row:
//!
//! ```no_run
//! use dutyfree_pricing::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("quotes.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(record) => println!("Quote {} at {}", record.id, record.store),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record errors are yielded as Err variants in the iterator
//! - `line()` reports the file line of the last record yielded

use crate::io::csv_format::{convert_csv_record, QuoteCsvRecord};
use crate::types::{PricingError, QuoteRecord};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: u64,
}

impl SyncReader {
    /// Open a quote CSV file
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` for a missing file and `IoError` for any other
    /// failure to open it.
    pub fn new(path: &Path) -> Result<Self, PricingError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => PricingError::file_not_found(&path.display().to_string()),
            _ => PricingError::from(e),
        })?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 1,
        })
    }

    /// File line of the most recently yielded record (the header is line 1)
    pub fn line(&self) -> u64 {
        self.line_num
    }
}

impl Iterator for SyncReader {
    type Item = Result<QuoteRecord, PricingError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<QuoteCsvRecord>();
        let next = deserializer.next()?;
        self.line_num += 1;

        Some(next.map_err(PricingError::from).and_then(convert_csv_record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "id,store,gross,discounts,domestic_cny\n";

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_sync_reader_new_fails_on_missing_file() {
        let result = SyncReader::new(Path::new("nonexistent.csv"));
        assert!(matches!(
            result.unwrap_err(),
            PricingError::FileNotFound { .. }
        ));
    }

    #[test]
    fn test_sync_reader_iterates_valid_quote() {
        let file = create_temp_csv(&format!(
            "{}1,Outlet,500000,Member 5%|Voucher,3000\n",
            HEADER
        ));

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(records.len(), 1);
        let record = records[0].as_ref().unwrap();
        assert_eq!(record.id, 1);
        assert_eq!(record.store, "Outlet");
        assert_eq!(record.gross, Decimal::from(500_000));
        assert_eq!(record.discounts, vec!["Member 5%", "Voucher"]);
        assert_eq!(record.domestic_cny, Some(Decimal::from(3_000)));
    }

    #[test]
    fn test_sync_reader_accepts_missing_optional_columns() {
        let file = create_temp_csv(&format!("{}1,Outlet,500000,,\n2,Outlet,1000\n", HEADER));

        let records: Vec<_> = SyncReader::new(file.path()).unwrap().collect();

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.is_ok()));
        assert!(records[1].as_ref().unwrap().discounts.is_empty());
    }

    #[test]
    fn test_sync_reader_tracks_lines_of_bad_records() {
        let file = create_temp_csv(&format!(
            "{}1,Outlet,1000,,\n2,Outlet,invalid,,\nthree,Outlet,1000,,\n4,Outlet,1000,,\n",
            HEADER
        ));
        let mut reader = SyncReader::new(file.path()).unwrap();

        assert!(reader.next().unwrap().is_ok());
        assert!(matches!(
            reader.next().unwrap(),
            Err(PricingError::InvalidAmount { quote: 2, .. })
        ));
        assert_eq!(reader.line(), 3);
        assert!(matches!(
            reader.next().unwrap(),
            Err(PricingError::ParseError { .. })
        ));
        assert_eq!(reader.line(), 4);
        assert!(reader.next().unwrap().is_ok());
        assert!(reader.next().is_none());
    }
}
