//! docvec-ingest: document ingestion pipeline for embedding generation
//!
//! Given a notification that a document landed in object storage, the
//! pipeline downloads it, extracts plain text, splits the text into
//! bounded overlapping chunks, embeds each chunk through an external
//! embedding service, and persists one record per chunk/vector pair.
//!
//! Storage, extraction, and persistence sit behind injected traits
//! ([`providers`]); the crate ships a local filesystem object store, PDF
//! and plain-text extractors, an OpenAI-compatible embedder, and a SQLite
//! record store so the pipeline runs end to end out of the box.

pub mod config;
pub mod embeddings;
pub mod error;
pub mod ingestion;
pub mod pipeline;
pub mod providers;
pub mod storage;
pub mod types;

pub use config::PipelineConfig;
pub use error::{Error, Result};
pub use pipeline::{DocumentProcessor, ProcessOutcome};
pub use types::{Chunk, DocumentNotification, EmbeddingRecord, FileType, InvocationResult};
