use std::sync::Arc;

use kontakt_infra::{Config, ContactStore, PostgresContactStore, StoreError};

/// Handles shared by every request.
///
/// Built once at startup and injected into handlers through an `Extension`;
/// there is no global database handle.
#[derive(Clone)]
pub struct AppServices {
    contacts: Arc<dyn ContactStore>,
}

impl AppServices {
    pub fn new(contacts: Arc<dyn ContactStore>) -> Self {
        Self { contacts }
    }

    pub fn contacts(&self) -> &dyn ContactStore {
        self.contacts.as_ref()
    }
}

/// Connect to Postgres and make sure the `contact_messages` table exists.
pub async fn build_services(config: &Config) -> Result<AppServices, StoreError> {
    let store = PostgresContactStore::connect(&config.database_url).await?;
    store.ensure_schema().await?;
    tracing::info!("contact store ready");

    Ok(AppServices::new(Arc::new(store)))
}
