//! SQLite persistence for embedding records

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::providers::RecordStore;
use crate::types::EmbeddingRecord;

/// SQLite-backed embedding record store
///
/// One row per chunk; the embedding vector is stored as a JSON array
/// string. Writes are independent single-row inserts with no cross-record
/// transaction.
pub struct SqliteRecordStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteRecordStore {
    /// Create or open the database at the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)
            .map_err(|e| Error::persistence(format!("Failed to open database: {}", e)))?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.migrate()?;
        Ok(store)
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::persistence(format!("Failed to open in-memory database: {}", e)))?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.migrate()?;
        Ok(store)
    }

    /// Run database migrations
    fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
        "#,
        )
        .map_err(|e| Error::persistence(format!("Failed to set pragmas: {}", e)))?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS document_embeddings (
                chunk_id TEXT PRIMARY KEY,
                document_id TEXT NOT NULL,
                chunk_index INTEGER NOT NULL,
                text TEXT NOT NULL,
                embedding TEXT NOT NULL,
                embedding_model TEXT NOT NULL,
                embedding_dimension INTEGER NOT NULL,
                file_name TEXT NOT NULL,
                uploaded_by TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_embeddings_document_id
                ON document_embeddings(document_id);
        "#,
        )
        .map_err(|e| Error::persistence(format!("Failed to run migrations: {}", e)))?;

        Ok(())
    }

    /// Number of records stored for a document
    pub fn count_for_document(&self, document_id: &str) -> Result<u64> {
        let conn = self.conn.lock();
        let count: u64 = conn
            .query_row(
                "SELECT COUNT(*) FROM document_embeddings WHERE document_id = ?1",
                params![document_id],
                |row| row.get(0),
            )
            .map_err(|e| Error::persistence(e.to_string()))?;
        Ok(count)
    }

    /// Fetch a single record by chunk id
    pub fn get_record(&self, chunk_id: &str) -> Result<Option<EmbeddingRecord>> {
        let conn = self.conn.lock();
        conn.query_row(
            r#"SELECT chunk_id, document_id, chunk_index, text, embedding,
                      embedding_model, embedding_dimension, file_name, uploaded_by, created_at
               FROM document_embeddings WHERE chunk_id = ?1"#,
            params![chunk_id],
            |row| {
                let embedding_json: String = row.get(4)?;
                let created_at: DateTime<Utc> = row.get(9)?;
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?,
                    row.get::<_, u32>(2)?, row.get::<_, String>(3)?,
                    embedding_json, row.get::<_, String>(5)?,
                    row.get::<_, usize>(6)?, row.get::<_, String>(7)?,
                    row.get::<_, String>(8)?, created_at))
            },
        )
        .optional()
        .map_err(|e| Error::persistence(e.to_string()))?
        .map(|(chunk_id, document_id, chunk_index, text, embedding_json,
               embedding_model, embedding_dimension, file_name, uploaded_by, created_at)| {
            let embedding: Vec<f32> = serde_json::from_str(&embedding_json)?;
            Ok(EmbeddingRecord {
                chunk_id,
                document_id,
                chunk_index,
                text,
                embedding,
                embedding_dimension,
                embedding_model,
                file_name,
                uploaded_by,
                created_at,
            })
        })
        .transpose()
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn put_record(&self, record: &EmbeddingRecord) -> Result<()> {
        let embedding_json = serde_json::to_string(&record.embedding)?;
        let conn = self.conn.lock();
        conn.execute(
            r#"INSERT OR REPLACE INTO document_embeddings
               (chunk_id, document_id, chunk_index, text, embedding,
                embedding_model, embedding_dimension, file_name, uploaded_by, created_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"#,
            params![
                record.chunk_id,
                record.document_id,
                record.chunk_index,
                record.text,
                embedding_json,
                record.embedding_model,
                record.embedding_dimension,
                record.file_name,
                record.uploaded_by,
                record.created_at,
            ],
        )
        .map_err(|e| Error::persistence(e.to_string()))?;
        Ok(())
    }

    fn name(&self) -> &str {
        "sqlite"
    }
}
