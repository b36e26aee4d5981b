//! Embedding provider trait

use async_trait::async_trait;

use crate::error::Result;

/// A service that turns text into an embedding vector
///
/// Implementations:
/// - [`crate::providers::OpenAiEmbedder`]: OpenAI-compatible HTTP endpoint
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding for a single text
    ///
    /// One call per chunk; the pipeline never batches multiple chunks
    /// into one request.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Model identifier recorded alongside every vector
    fn model(&self) -> &str;

    /// Provider name for logging
    fn name(&self) -> &str;
}
