//! Ingestion binary
//!
//! Reads a notification JSON file (a single object or an array), builds
//! the pipeline from configuration plus local providers, and processes
//! every notified document.
//!
//! Run with: cargo run -p docvec-ingest -- --notifications batch.json

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docvec_ingest::config::PipelineConfig;
use docvec_ingest::pipeline::DocumentProcessor;
use docvec_ingest::providers::{LocalObjectStore, OpenAiEmbedder};
use docvec_ingest::storage::SqliteRecordStore;
use docvec_ingest::types::DocumentNotification;

#[derive(Parser, Debug)]
#[command(name = "docvec-ingest", about = "Process document notifications into embedding records")]
struct Args {
    /// Path to a JSON file with one notification or an array of them
    #[arg(long)]
    notifications: PathBuf,

    /// Optional TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Accept both a single notification and a batch
fn read_notifications(path: &PathBuf) -> anyhow::Result<Vec<DocumentNotification>> {
    let raw = std::fs::read_to_string(path)?;
    if let Ok(batch) = serde_json::from_str::<Vec<DocumentNotification>>(&raw) {
        return Ok(batch);
    }
    let single: DocumentNotification = serde_json::from_str(&raw)?;
    Ok(vec![single])
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docvec_ingest=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::from_env()?,
    };

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding model: {}", config.embedding.model);
    tracing::info!("  - Chunk size: {}", config.chunking.chunk_size);
    tracing::info!("  - Chunk overlap: {}", config.chunking.overlap);
    tracing::info!("  - Data dir: {}", config.storage.data_dir.display());

    let notifications = read_notifications(&args.notifications)?;
    tracing::info!("Loaded {} notification(s)", notifications.len());

    // Credential check happens here, before any network call.
    let embedder = Arc::new(OpenAiEmbedder::new(&config.embedding)?);
    let objects = Arc::new(LocalObjectStore::new(config.storage.data_dir.clone()));
    let records = Arc::new(SqliteRecordStore::new(&config.storage.database_path)?);

    let processor = DocumentProcessor::new(&config, objects, embedder, records);
    let result = processor.handle_batch(&notifications).await;

    tracing::info!(status = result.status_code, "{}", result.body);
    if !result.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
