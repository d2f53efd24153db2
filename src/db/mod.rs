pub(crate) mod models;
pub(crate) mod types;

use std::sync::Arc;

use crate::core::config::{Settings, StoreBackend};
use crate::repositories::memory::MemoryStore;
use crate::repositories::supabase::SupabaseStore;
use crate::repositories::Datastore;

/// Build the entity gateways for the configured backend.
pub(crate) fn init_store(settings: &Settings) -> Datastore {
    match settings.store().backend {
        StoreBackend::Supabase => {
            Datastore::from_backend(Arc::new(SupabaseStore::from_settings(settings)))
        }
        StoreBackend::Memory => Datastore::from_backend(MemoryStore::new()),
    }
}
