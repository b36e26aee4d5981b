//! Per-document embedding generation

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::EmbeddingProvider;
use crate::types::{Chunk, DocumentNotification, EmbeddingRecord};

/// Turns a document's chunk sequence into embedding records
///
/// Chunks are embedded strictly one at a time, in index order. The first
/// failing chunk aborts the whole batch: partial embedding sets are not
/// useful downstream, so the caller persists the complete set or none.
pub struct EmbeddingGenerator {
    provider: Arc<dyn EmbeddingProvider>,
}

impl EmbeddingGenerator {
    /// Create a generator over an embedding provider
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self { provider }
    }

    /// Embed every chunk of a document, in order
    ///
    /// On failure the error names the failing chunk's index and carries
    /// the upstream detail; no records are returned.
    pub async fn generate(
        &self,
        notification: &DocumentNotification,
        chunks: &[Chunk],
    ) -> Result<Vec<EmbeddingRecord>> {
        tracing::info!(
            document_id = %notification.document_id,
            chunk_count = chunks.len(),
            provider = self.provider.name(),
            "generating embeddings"
        );

        let mut records = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            let embedding =
                self.provider
                    .embed(&chunk.text)
                    .await
                    .map_err(|e| Error::Embedding {
                        chunk_index: chunk.index,
                        detail: e.to_string(),
                    })?;

            tracing::debug!(
                document_id = %notification.document_id,
                chunk_index = chunk.index,
                dimension = embedding.len(),
                "generated embedding"
            );

            records.push(EmbeddingRecord::new(
                notification,
                chunk,
                embedding,
                self.provider.model(),
            ));
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedEmbedder {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl EmbeddingProvider for FixedEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![0.1, 0.2, 0.3])
        }

        fn model(&self) -> &str {
            "fixed-model"
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct FailAtIndex {
        fail_at: usize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl EmbeddingProvider for FailAtIndex {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call == self.fail_at {
                return Err(Error::EmbeddingUpstream {
                    status: 429,
                    body: "rate limited".to_string(),
                });
            }
            Ok(vec![1.0])
        }

        fn model(&self) -> &str {
            "failing-model"
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn notification() -> DocumentNotification {
        DocumentNotification {
            document_id: "doc-9".to_string(),
            s3_bucket: "uploads".to_string(),
            s3_key: "doc-9/a.txt".to_string(),
            file_name: "a.txt".to_string(),
            uploaded_by: "tester".to_string(),
        }
    }

    fn chunks(n: u32) -> Vec<Chunk> {
        (0..n).map(|i| Chunk::new(i, format!("chunk {}", i))).collect()
    }

    #[tokio::test]
    async fn test_records_carry_model_and_dimension() {
        let provider = Arc::new(FixedEmbedder {
            calls: AtomicUsize::new(0),
        });
        let generator = EmbeddingGenerator::new(provider.clone());

        let records = generator.generate(&notification(), &chunks(2)).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].chunk_id, "doc-9_chunk_0");
        assert_eq!(records[1].chunk_id, "doc-9_chunk_1");
        assert_eq!(records[0].embedding, vec![0.1, 0.2, 0.3]);
        assert_eq!(records[0].embedding_dimension, 3);
        assert_eq!(records[0].embedding_model, "fixed-model");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_first_failure_aborts_batch() {
        let provider = Arc::new(FailAtIndex {
            fail_at: 2,
            calls: AtomicUsize::new(0),
        });
        let generator = EmbeddingGenerator::new(provider.clone());

        let err = generator.generate(&notification(), &chunks(5)).await.unwrap_err();
        match err {
            Error::Embedding { chunk_index, detail } => {
                assert_eq!(chunk_index, 2);
                assert!(detail.contains("429"));
                assert!(detail.contains("rate limited"));
            }
            other => panic!("unexpected error: {other}"),
        }
        // Calls stop at the failing chunk: 0, 1, and the failed 2.
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_empty_chunk_sequence() {
        let provider = Arc::new(FixedEmbedder {
            calls: AtomicUsize::new(0),
        });
        let generator = EmbeddingGenerator::new(provider.clone());

        let records = generator.generate(&notification(), &[]).await.unwrap();
        assert!(records.is_empty());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }
}
