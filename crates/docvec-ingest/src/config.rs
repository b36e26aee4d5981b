//! Configuration for the ingestion pipeline

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable holding the embedding service credential
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Main pipeline configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,
    /// Embedding service configuration
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    /// Local storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

impl PipelineConfig {
    /// Load configuration from a TOML file, then pull the embedding
    /// credential from the environment.
    ///
    /// The credential is never read from the file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let mut config: Self = toml::from_str(&raw)
            .map_err(|e| Error::config(format!("Invalid config file: {}", e)))?;
        config.embedding.api_key = std::env::var(API_KEY_ENV).unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from defaults plus the environment
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.embedding.api_key = std::env::var(API_KEY_ENV).unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Validate chunking bounds; the embedding credential is checked by
    /// the embedder at construction time.
    pub fn validate(&self) -> Result<()> {
        self.chunking.validate()
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum chunk size in characters
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in characters
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            overlap: 50,
        }
    }
}

impl ChunkingConfig {
    /// Validate chunking bounds
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(Error::config("chunk_size must be greater than zero"));
        }
        if self.overlap >= self.chunk_size {
            return Err(Error::config(format!(
                "overlap ({}) must be smaller than chunk_size ({})",
                self.overlap, self.chunk_size
            )));
        }
        Ok(())
    }
}

/// Embedding service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Embedding endpoint URL
    pub api_url: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Bearer credential; populated from the environment, never serialized
    #[serde(skip)]
    pub api_key: String,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1/embeddings".to_string(),
            model: "text-embedding-3-small".to_string(),
            timeout_secs: 30,
            api_key: String::new(),
        }
    }
}

/// Local storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for the local object store (bucket directories)
    pub data_dir: PathBuf,
    /// Path to the SQLite database holding embedding records
    pub database_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            database_path: PathBuf::from("data/embeddings.db"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.chunking.chunk_size, 500);
        assert_eq!(config.chunking.overlap, 50);
        assert_eq!(config.embedding.model, "text-embedding-3-small");
        assert_eq!(config.embedding.timeout_secs, 30);
        assert!(config.embedding.api_key.is_empty());
    }

    #[test]
    fn test_chunking_validation() {
        let valid = ChunkingConfig {
            chunk_size: 500,
            overlap: 50,
        };
        assert!(valid.validate().is_ok());

        let zero_size = ChunkingConfig {
            chunk_size: 0,
            overlap: 0,
        };
        assert!(matches!(zero_size.validate(), Err(Error::Config(_))));

        let overlap_too_large = ChunkingConfig {
            chunk_size: 100,
            overlap: 100,
        };
        assert!(matches!(
            overlap_too_large.validate(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let raw = r#"
            [chunking]
            chunk_size = 256
            overlap = 32

            [embedding]
            api_url = "http://localhost:9000/v1/embeddings"
            model = "test-model"
            timeout_secs = 5

            [storage]
            data_dir = "/tmp/docvec"
            database_path = "/tmp/docvec/embeddings.db"
        "#;
        let config: PipelineConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.chunking.chunk_size, 256);
        assert_eq!(config.embedding.model, "test-model");
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/docvec"));
        // The credential never comes from the file
        assert!(config.embedding.api_key.is_empty());
    }
}
