use thiserror::Error;

use kontakt_core::{ContactMessage, NewContactMessage};

/// Contact store operation error.
///
/// All variants are infrastructure failures and surface as server errors;
/// input validation happens before a store is ever called.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backend could not be reached (pool closed or timed out, I/O, TLS).
    #[error("connection error: {0}")]
    Connection(String),

    /// The database rejected the row (SQLSTATE class 23).
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// Any other database, protocol or decode failure.
    #[error("query failed: {0}")]
    Query(String),
}

/// Append-only store for contact messages.
///
/// ## Atomicity
///
/// `insert` is all-or-nothing: if it returns an error, no row is left behind.
/// Implementations that use transactions must roll back before returning.
#[async_trait::async_trait]
pub trait ContactStore: Send + Sync {
    /// Persist a new message, assigning its id and `created_at`.
    async fn insert(&self, message: NewContactMessage) -> Result<ContactMessage, StoreError>;

    /// Every stored message, in the backend's default order.
    async fn list_all(&self) -> Result<Vec<ContactMessage>, StoreError>;
}
