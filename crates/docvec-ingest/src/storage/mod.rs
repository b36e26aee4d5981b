//! Durable storage backends

mod database;

pub use database::SqliteRecordStore;
