//! Application state shared across HTTP handlers

use crate::auth::AuthSystem;
use crate::config::Config;
use crate::store::EntityStore;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in `Arc` for sharing across workers.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Entity store
    pub store: Arc<EntityStore>,
    /// Authentication system
    pub auth: Arc<AuthSystem>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, store: Arc<EntityStore>, auth: AuthSystem) -> Self {
        Self {
            config: Arc::new(config),
            store,
            auth: Arc::new(auth),
        }
    }
}
