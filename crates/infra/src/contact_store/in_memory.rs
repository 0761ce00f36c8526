use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;

use kontakt_core::{ContactId, ContactMessage, NewContactMessage};

use super::r#trait::{ContactStore, StoreError};

/// In-memory contact store.
///
/// Intended for tests/dev. Records are kept in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryContactStore {
    messages: RwLock<Vec<ContactMessage>>,
    unavailable: AtomicBool,
}

impl InMemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a storage outage: while set, every operation fails with
    /// [`StoreError::Connection`] and no state is touched.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.messages.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self, operation: &str) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Connection(format!(
                "in-memory store unavailable in {operation}"
            )));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ContactStore for InMemoryContactStore {
    async fn insert(&self, message: NewContactMessage) -> Result<ContactMessage, StoreError> {
        self.check_available("insert_contact_message")?;

        let mut messages = self
            .messages
            .write()
            .map_err(|_| StoreError::Query("in-memory store lock poisoned".to_string()))?;

        // Timestamp under the lock so `created_at` order matches insertion order.
        let stored = message.into_stored(ContactId::generate(), Utc::now());
        messages.push(stored.clone());

        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<ContactMessage>, StoreError> {
        self.check_available("list_contact_messages")?;

        let messages = self
            .messages
            .read()
            .map_err(|_| StoreError::Query("in-memory store lock poisoned".to_string()))?;

        Ok(messages.clone())
    }
}
