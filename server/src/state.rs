//! Application state shared across HTTP handlers.

use crate::config::Config;
use crate::session::SessionStore;
use axum::extract::FromRef;
use rhyno_store::BookingStore;
use std::sync::Arc;

/// Shared state handed to every handler.
///
/// Generic over the notification and checkout providers so tests can
/// substitute mocks. Cloned per request; everything inside is cheap
/// to clone.
#[derive(Debug, Clone)]
pub struct AppState<N, C> {
    /// Booking record store.
    pub store: BookingStore,
    /// Admin notification channel.
    pub notifier: N,
    /// Hosted checkout provider.
    pub checkout: C,
    /// Browser session store.
    pub sessions: SessionStore,
    /// Process-wide configuration.
    pub config: Arc<Config>,
}

impl<N, C> AppState<N, C> {
    /// Assemble the application state.
    #[must_use]
    pub fn new(store: BookingStore, notifier: N, checkout: C, config: Arc<Config>) -> Self {
        Self {
            store,
            notifier,
            checkout,
            sessions: SessionStore::new(),
            config,
        }
    }
}

// Lets the session extractor pull its store out of the state.
impl<N, C> FromRef<AppState<N, C>> for SessionStore {
    fn from_ref(state: &AppState<N, C>) -> Self {
        state.sessions.clone()
    }
}
