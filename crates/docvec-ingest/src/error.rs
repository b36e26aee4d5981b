//! Error types for the ingestion pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Ingestion pipeline errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (missing credential, invalid chunking bounds)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Object download error
    #[error("Failed to download '{bucket}/{key}': {message}")]
    Download {
        bucket: String,
        key: String,
        message: String,
    },

    /// Text extraction error
    ///
    /// Recovered inside the extractor registry into a diagnostic text
    /// value; this variant never crosses the pipeline boundary.
    #[error("Text extraction failed for '{file_name}': {message}")]
    Extraction { file_name: String, message: String },

    /// Embedding service returned a non-success response
    #[error("Embedding service returned {status}: {body}")]
    EmbeddingUpstream { status: u16, body: String },

    /// Embedding batch aborted at a specific chunk
    #[error("Embedding failed for chunk {chunk_index}: {detail}")]
    Embedding { chunk_index: u32, detail: String },

    /// Record persistence error
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a download error
    pub fn download(
        bucket: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Download {
            bucket: bucket.into(),
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create an extraction error
    pub fn extraction(file_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Extraction {
            file_name: file_name.into(),
            message: message.into(),
        }
    }

    /// Create a persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence(message.into())
    }

    /// Pipeline stage this error belongs to, for logs and invocation results
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Config(_) => "configuration",
            Self::Download { .. } => "download",
            Self::Extraction { .. } => "extraction",
            Self::EmbeddingUpstream { .. } | Self::Embedding { .. } => "embedding",
            Self::Persistence(_) => "persistence",
            Self::Io(_) => "io",
            Self::Json(_) => "serialization",
            Self::Http(_) => "http",
        }
    }
}
