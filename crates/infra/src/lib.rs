//! Infrastructure layer: Postgres persistence and process configuration.

pub mod config;
pub mod contact_store;

pub use config::{Config, ConfigError};
pub use contact_store::{ContactStore, InMemoryContactStore, PostgresContactStore, StoreError};
