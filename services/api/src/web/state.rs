//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use health_tracker_core::ports::{AccountStore, RecordStore, SessionStore};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountStore>,
    pub records: Arc<dyn RecordStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Builds the state from a single adapter that serves every store port.
    pub fn new<S>(store: Arc<S>, config: Arc<Config>) -> Self
    where
        S: AccountStore + RecordStore + SessionStore + 'static,
    {
        Self {
            accounts: store.clone(),
            records: store.clone(),
            sessions: store,
            config,
        }
    }
}
