//! Contact message persistence boundary.
//!
//! The store owns record identity and timestamps; callers hand over a
//! validated [`kontakt_core::NewContactMessage`] and get the stored record back.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryContactStore;
pub use postgres::PostgresContactStore;
pub use r#trait::{ContactStore, StoreError};
