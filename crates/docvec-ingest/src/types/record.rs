//! Chunk and embedding record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DocumentNotification;

/// A bounded contiguous slice of a document's text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Position in the document's chunk sequence, contiguous from 0
    pub index: u32,
    /// Trimmed chunk text, never empty
    pub text: String,
}

impl Chunk {
    /// Create a chunk
    pub fn new(index: u32, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

/// One chunk's text paired with its embedding vector and provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    /// `{document_id}_chunk_{index}`
    pub chunk_id: String,
    /// Owning document identifier
    pub document_id: String,
    /// Chunk position within the document
    pub chunk_index: u32,
    /// Chunk text
    pub text: String,
    /// Embedding vector as returned by the service
    pub embedding: Vec<f32>,
    /// Length of the embedding vector, recorded per response
    pub embedding_dimension: usize,
    /// Model that produced the vector
    pub embedding_model: String,
    /// Original file name
    pub file_name: String,
    /// Uploader identity
    pub uploaded_by: String,
    /// Record creation time
    pub created_at: DateTime<Utc>,
}

impl EmbeddingRecord {
    /// Build a record for one chunk of a notified document
    pub fn new(
        notification: &DocumentNotification,
        chunk: &Chunk,
        embedding: Vec<f32>,
        model: impl Into<String>,
    ) -> Self {
        let embedding_dimension = embedding.len();
        Self {
            chunk_id: format!("{}_chunk_{}", notification.document_id, chunk.index),
            document_id: notification.document_id.clone(),
            chunk_index: chunk.index,
            text: chunk.text.clone(),
            embedding,
            embedding_dimension,
            embedding_model: model.into(),
            file_name: notification.file_name.clone(),
            uploaded_by: notification.uploaded_by.clone(),
            created_at: Utc::now(),
        }
    }
}
