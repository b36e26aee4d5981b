//! Core data types for documents, chunks, and embedding records

mod document;
mod record;

pub use document::{DocumentNotification, FileType};
pub use record::{Chunk, EmbeddingRecord};

/// Externally observable outcome of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationResult {
    /// 200 on success, 500 on failure
    pub status_code: u16,
    /// Short human-readable message
    pub body: String,
}

impl InvocationResult {
    /// Whether the invocation succeeded
    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}
