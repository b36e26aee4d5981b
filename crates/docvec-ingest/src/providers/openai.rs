//! OpenAI-compatible embedding provider

use std::time::Duration;

use async_trait::async_trait;

use crate::config::{EmbeddingConfig, API_KEY_ENV};
use crate::error::{Error, Result};
use crate::providers::embedding::EmbeddingProvider;

/// Embedding provider speaking the OpenAI embeddings wire protocol
///
/// One synchronous request per text, bounded by the configured timeout,
/// with no retries: a failed call is terminal for the caller's batch.
#[derive(Debug)]
pub struct OpenAiEmbedder {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiEmbedder {
    /// Create a new embedder
    ///
    /// Fails fast with a configuration error when the credential is
    /// missing, before any network call is attempted.
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(Error::config(format!(
                "{} environment variable not set",
                API_KEY_ENV
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }
}

#[derive(serde::Serialize)]
struct EmbedRequest<'a> {
    input: &'a str,
    model: &'a str,
}

#[derive(serde::Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(serde::Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbedRequest {
            input: text,
            model: &self.model,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::EmbeddingUpstream { status, body });
        }

        let parsed: EmbedResponse = response.json().await.map_err(|e| {
            Error::EmbeddingUpstream {
                status: 200,
                body: format!("malformed embedding response: {}", e),
            }
        })?;

        parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| Error::EmbeddingUpstream {
                status: 200,
                body: "no embedding in response".to_string(),
            })
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn name(&self) -> &str {
        "openai"
    }
}
