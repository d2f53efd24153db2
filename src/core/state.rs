use std::sync::Arc;

use crate::core::config::Settings;
use crate::repositories::Datastore;

#[derive(Clone)]
pub(crate) struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    settings: Settings,
    store: Datastore,
}

impl AppState {
    pub(crate) fn new(settings: Settings, store: Datastore) -> Self {
        Self { inner: Arc::new(InnerState { settings, store }) }
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    pub(crate) fn store(&self) -> &Datastore {
        &self.inner.store
    }
}
