//! Provider abstractions for embeddings, object storage, and record persistence
//!
//! Collaborators are constructor-injected traits so the pipeline declares
//! what it needs and tests can substitute fakes.

pub mod embedding;
pub mod object_store;
pub mod openai;
pub mod record_store;

pub use embedding::EmbeddingProvider;
pub use object_store::{LocalObjectStore, ObjectStore};
pub use openai::OpenAiEmbedder;
pub use record_store::RecordStore;
