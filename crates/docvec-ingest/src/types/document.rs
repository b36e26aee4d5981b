//! Trigger message and file type detection

use serde::{Deserialize, Serialize};

/// Notification that a document is ready for processing
///
/// One invocation may carry several of these; each is processed
/// independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentNotification {
    /// Opaque document identifier
    pub document_id: String,
    /// Storage bucket holding the uploaded object
    pub s3_bucket: String,
    /// Object key within the bucket
    pub s3_key: String,
    /// Original file name, used for extractor dispatch and records
    pub file_name: String,
    /// Identity of the uploader
    pub uploaded_by: String,
}

/// Recognized file types for extractor dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// PDF document
    Pdf,
    /// Plain text file
    Text,
    /// Unrecognized extension; handled by the fallback extractor
    Unknown,
}

impl FileType {
    /// Detect file type from a file name's extension
    pub fn from_file_name(file_name: &str) -> Self {
        let extension = std::path::Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        match extension.as_str() {
            "pdf" => Self::Pdf,
            "txt" | "text" | "md" | "markdown" => Self::Text,
            _ => Self::Unknown,
        }
    }
}
