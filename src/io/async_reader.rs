//! Asynchronous CSV reader with batch interface
//!
//! The AsyncReader uses csv-async for streaming CSV parsing and hands quote
//! requests out in batches. Rows that fail to parse or convert are logged and
//! skipped, so a batch only ever holds valid records.
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of QuoteRecords
//!                  ↓
//!           csv_format module
//!           (QuoteCsvRecord, convert_csv_record)
//! ```

use crate::io::csv_format::{convert_csv_record, QuoteCsvRecord};
use crate::types::QuoteRecord;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use tracing::warn;

pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self { csv_reader }
    }

    /// Read up to `batch_size` valid records
    ///
    /// An empty batch means the input is exhausted.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<QuoteRecord> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<QuoteCsvRecord>();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(csv_record)) => match convert_csv_record(csv_record) {
                    Ok(record) => batch.push(record),
                    Err(e) => warn!(error = %e, "skipping quote record"),
                },
                Some(Err(e)) => warn!(error = %e, "skipping malformed row"),
                None => break,
            }
        }

        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::io::Cursor;
    use rust_decimal::Decimal;

    const HEADER: &str = "id,store,gross,discounts,domestic_cny\n";

    fn reader(rows: &str) -> AsyncReader<Cursor<Vec<u8>>> {
        AsyncReader::new(Cursor::new(format!("{}{}", HEADER, rows).into_bytes()))
    }

    #[tokio::test]
    async fn test_async_reader_read_batch() {
        let mut async_reader =
            reader("1,Outlet,1000,,\n2,Harbor,2000,Voucher,\n3,Outlet,3000,,6000\n");

        let batch = async_reader.read_batch(2).await;
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].id, 1);
        assert_eq!(batch[1].id, 2);
        assert_eq!(batch[1].discounts, vec!["Voucher"]);

        let batch = async_reader.read_batch(2).await;
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].domestic_cny, Some(Decimal::from(6_000)));

        assert!(async_reader.read_batch(2).await.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_empty_csv() {
        let mut async_reader = reader("");
        assert!(async_reader.read_batch(10).await.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_skips_invalid_records() {
        let mut async_reader = reader("1,Outlet,-5,,\nx,Outlet,10,,\n3,Outlet,10,,\n");

        let batch = async_reader.read_batch(10).await;

        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].id, 3);
    }

    #[tokio::test]
    async fn test_async_reader_whitespace_handling() {
        let mut async_reader = reader(" 7 , Outlet , 1000 , A | B , \n");

        let batch = async_reader.read_batch(10).await;

        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].id, 7);
        assert_eq!(batch[0].store, "Outlet");
        assert_eq!(batch[0].discounts, vec!["A", "B"]);
    }
}
