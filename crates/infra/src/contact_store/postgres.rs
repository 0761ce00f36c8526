//! Postgres-backed contact store.
//!
//! ## Error Mapping
//!
//! SQLx errors are mapped to `StoreError` as follows:
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError |
//! |------------|----------------------|------------|
//! | Database (integrity constraint) | `23xxx` | `Constraint` |
//! | Database (other) | Any other | `Query` |
//! | PoolClosed / PoolTimedOut / Io / Tls | N/A | `Connection` |
//! | Other (decode, protocol, ...) | N/A | `Query` |
//!
//! The mapped message always names the failing operation and keeps the
//! underlying error text.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};
use tracing::instrument;
use uuid::Uuid;

use kontakt_core::{ContactId, ContactMessage, NewContactMessage};

use super::r#trait::{ContactStore, StoreError};

/// Bootstrap DDL for the single table this service owns.
///
/// Idempotent; run once at startup. Existing tables are left untouched.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS contact_messages (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL,
    message TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

/// Postgres-backed contact store.
///
/// `id` and `created_at` come from column defaults, so the insert only binds
/// the three caller-supplied fields and reads the rest back with `RETURNING`.
///
/// Cloning is cheap: `PgPool` is itself a handle around a shared pool.
#[derive(Debug, Clone)]
pub struct PostgresContactStore {
    pool: PgPool,
}

impl PostgresContactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool with sqlx defaults.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the `contact_messages` table if it does not exist yet.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ContactStore for PostgresContactStore {
    #[instrument(skip_all, err)]
    async fn insert(&self, message: NewContactMessage) -> Result<ContactMessage, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;

        let inserted = sqlx::query(
            r#"
            INSERT INTO contact_messages (name, email, message)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, message, created_at
            "#,
        )
        .bind(message.name())
        .bind(message.email())
        .bind(message.message())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("insert_contact_message", e))
        .and_then(|row| row_to_contact_message(&row));

        let stored = match inserted {
            Ok(stored) => stored,
            Err(e) => {
                rollback(tx).await;
                return Err(e);
            }
        };

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_transaction", e))?;

        Ok(stored)
    }

    #[instrument(skip_all, err)]
    async fn list_all(&self) -> Result<Vec<ContactMessage>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, email, message, created_at
            FROM contact_messages
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_contact_messages", e))?;

        rows.iter().map(row_to_contact_message).collect()
    }
}

/// Roll back after a failed statement. Rollback failures are logged, not returned.
async fn rollback(tx: Transaction<'static, Postgres>) {
    if let Err(e) = tx.rollback().await {
        tracing::warn!(error = %e, "rollback failed");
    }
}

fn row_to_contact_message(row: &PgRow) -> Result<ContactMessage, StoreError> {
    let decode = |e| map_sqlx_error("decode_contact_message", e);

    let id: Uuid = row.try_get("id").map_err(decode)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(decode)?;

    Ok(ContactMessage {
        id: ContactId::from_uuid(id),
        name: row.try_get("name").map_err(decode)?,
        email: row.try_get("email").map_err(decode)?,
        message: row.try_get("message").map_err(decode)?,
        created_at,
    })
}

/// Map SQLx errors to `StoreError`, keeping the original error text.
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code() {
                // Class 23: integrity constraint violation (not null, unique, check, ...).
                Some(code) if code.starts_with("23") => StoreError::Constraint(msg),
                _ => StoreError::Query(msg),
            }
        }
        sqlx::Error::PoolClosed => {
            StoreError::Connection(format!("connection pool closed in {operation}"))
        }
        sqlx::Error::PoolTimedOut => {
            StoreError::Connection(format!("timed out acquiring connection in {operation}"))
        }
        sqlx::Error::Io(e) => StoreError::Connection(format!("io error in {operation}: {e}")),
        sqlx::Error::Tls(e) => StoreError::Connection(format!("tls error in {operation}: {e}")),
        other => StoreError::Query(format!("sqlx error in {operation}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_errors_map_to_connection() {
        assert_eq!(
            map_sqlx_error("insert_contact_message", sqlx::Error::PoolClosed),
            StoreError::Connection("connection pool closed in insert_contact_message".to_string())
        );
        assert!(matches!(
            map_sqlx_error("list_contact_messages", sqlx::Error::PoolTimedOut),
            StoreError::Connection(_)
        ));
    }

    #[test]
    fn io_errors_keep_underlying_text() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        match map_sqlx_error("connect", sqlx::Error::Io(io)) {
            StoreError::Connection(msg) => {
                assert!(msg.contains("connect"), "{msg}");
                assert!(msg.contains("connection refused"), "{msg}");
            }
            other => panic!("expected connection error, got {other:?}"),
        }
    }

    #[test]
    fn other_errors_map_to_query() {
        let err = map_sqlx_error("decode_contact_message", sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Query(ref m) if m.contains("decode_contact_message")));
    }

    /// Store against a live database, or `None` when `DATABASE_URL` is unset.
    async fn live_store() -> Option<PostgresContactStore> {
        let url = std::env::var("DATABASE_URL").ok().filter(|u| !u.is_empty())?;
        let store = PostgresContactStore::connect(&url)
            .await
            .expect("DATABASE_URL is set but not reachable");
        store.ensure_schema().await.expect("failed to create contact_messages");
        Some(store)
    }

    #[tokio::test]
    async fn failed_insert_is_rolled_back() {
        let Some(store) = live_store().await else {
            eprintln!("DATABASE_URL not set; skipping Postgres rollback test");
            return;
        };

        let before = store.list_all().await.unwrap();

        // Passes domain validation (no length limit) but overflows VARCHAR(255)
        // inside the transaction: SQLSTATE 22001.
        let marker = format!("rollback-{}@example.com", Uuid::new_v4());
        let too_long = NewContactMessage::new("x".repeat(256), marker.clone(), "Hola").unwrap();

        match store.insert(too_long).await {
            Err(StoreError::Query(msg)) => assert!(msg.contains("insert_contact_message"), "{msg}"),
            other => panic!("expected query error from overflowing insert, got {other:?}"),
        }

        let after = store.list_all().await.unwrap();
        assert!(after.iter().all(|m| m.email != marker));
        assert_eq!(after, before);
    }

    #[test]
    fn schema_declares_server_side_defaults() {
        assert!(SCHEMA.contains("CREATE TABLE IF NOT EXISTS contact_messages"));
        assert!(SCHEMA.contains("DEFAULT gen_random_uuid()"));
        assert!(SCHEMA.contains("TIMESTAMPTZ NOT NULL DEFAULT NOW()"));
    }
}
