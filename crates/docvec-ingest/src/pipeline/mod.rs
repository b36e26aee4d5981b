//! Pipeline orchestration: download, extract, chunk, embed, persist

use std::sync::Arc;

use crate::config::PipelineConfig;
use crate::embeddings::EmbeddingGenerator;
use crate::error::{Error, Result};
use crate::ingestion::{ExtractorRegistry, TextChunker};
use crate::providers::{EmbeddingProvider, ObjectStore, RecordStore};
use crate::types::{DocumentNotification, InvocationResult};

/// Outcome of processing a single document
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    /// Document the outcome belongs to
    pub document_id: String,
    /// Number of chunks embedded and persisted (0 for an empty document)
    pub chunks_embedded: usize,
}

/// Sequences the ingestion stages for one document at a time
///
/// Collaborators are injected at construction; the processor holds no
/// state across invocations, so one instance can serve many documents.
pub struct DocumentProcessor {
    objects: Arc<dyn ObjectStore>,
    extractors: ExtractorRegistry,
    chunker: TextChunker,
    generator: EmbeddingGenerator,
    records: Arc<dyn RecordStore>,
}

impl DocumentProcessor {
    /// Create a processor from injected collaborators
    pub fn new(
        config: &PipelineConfig,
        objects: Arc<dyn ObjectStore>,
        embedder: Arc<dyn EmbeddingProvider>,
        records: Arc<dyn RecordStore>,
    ) -> Self {
        Self {
            objects,
            extractors: ExtractorRegistry::new(),
            chunker: TextChunker::from_config(&config.chunking),
            generator: EmbeddingGenerator::new(embedder),
            records,
        }
    }

    /// Process one document: download, extract, chunk, embed, persist
    ///
    /// Zero chunks is not an error: the document completes successfully
    /// with a count of 0 and no embedding or persistence calls. The
    /// downloaded temporary file is released on every exit path.
    pub async fn process(&self, notification: &DocumentNotification) -> Result<ProcessOutcome> {
        let document_id = &notification.document_id;
        tracing::info!(
            document_id = %document_id,
            file_name = %notification.file_name,
            bucket = %notification.s3_bucket,
            key = %notification.s3_key,
            "processing document"
        );

        // Download into a temp file; dropping the handle removes it, so
        // early returns below cannot leak the local copy.
        let temp = self
            .objects
            .download(&notification.s3_bucket, &notification.s3_key)
            .await?;

        // Extraction failures degrade to diagnostic text inside the
        // registry rather than aborting the document.
        let text = self.extractors.extract_text(temp.path(), &notification.file_name);
        tracing::info!(document_id = %document_id, chars = text.chars().count(), "extracted text");

        let chunks = self.chunker.chunk(&text);
        if chunks.is_empty() {
            tracing::warn!(document_id = %document_id, "no text chunks to process");
            return Ok(ProcessOutcome {
                document_id: document_id.clone(),
                chunks_embedded: 0,
            });
        }
        tracing::info!(
            document_id = %document_id,
            chunk_count = chunks.len(),
            "split text into chunks"
        );

        // All-or-nothing: a failure here aborts before anything is persisted.
        let records = self.generator.generate(notification, &chunks).await?;

        for record in &records {
            self.records.put_record(record).await.map_err(|e| match e {
                e @ Error::Persistence(_) => e,
                other => Error::persistence(other.to_string()),
            })?;
        }
        tracing::info!(
            document_id = %document_id,
            record_count = records.len(),
            store = self.records.name(),
            "persisted embedding records"
        );

        // Best-effort cleanup; failure is logged and never changes the result.
        if let Err(e) = temp.close() {
            tracing::warn!(document_id = %document_id, error = %e, "failed to remove temporary file");
        }

        Ok(ProcessOutcome {
            document_id: document_id.clone(),
            chunks_embedded: records.len(),
        })
    }

    /// Process a batch of notifications independently and sequentially
    ///
    /// A failing document does not prevent attempting the next; any
    /// captured failure makes the whole invocation report 500.
    pub async fn handle_batch(&self, notifications: &[DocumentNotification]) -> InvocationResult {
        let mut failures = Vec::new();

        for notification in notifications {
            match self.process(notification).await {
                Ok(outcome) => {
                    tracing::info!(
                        document_id = %outcome.document_id,
                        chunks_embedded = outcome.chunks_embedded,
                        "document processed"
                    );
                }
                Err(e) => {
                    tracing::error!(
                        document_id = %notification.document_id,
                        stage = e.stage(),
                        error = %e,
                        "document processing failed"
                    );
                    failures.push(format!(
                        "{} (stage: {}): {}",
                        notification.document_id,
                        e.stage(),
                        e
                    ));
                }
            }
        }

        if failures.is_empty() {
            InvocationResult {
                status_code: 200,
                body: "Document processing completed successfully".to_string(),
            }
        } else {
            InvocationResult {
                status_code: 500,
                body: format!("Error processing documents: {}", failures.join("; ")),
            }
        }
    }
}
