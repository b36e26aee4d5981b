//! Record store trait for persisting embedding records

use async_trait::async_trait;

use crate::error::Result;
use crate::types::EmbeddingRecord;

/// Persistence for embedding records, one write per record
///
/// Implementations:
/// - [`crate::storage::SqliteRecordStore`]: SQLite table, vector stored
///   as a JSON array string
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a single record
    ///
    /// Writes are independent single-item inserts; there is no
    /// transactional guarantee across the records of a document.
    async fn put_record(&self, record: &EmbeddingRecord) -> Result<()>;

    /// Store name for logging
    fn name(&self) -> &str;
}
