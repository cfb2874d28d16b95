//! Application state

use std::sync::Arc;

use user_store::UserStore;

use crate::config::ServerConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// User store
    pub store: Arc<dyn UserStore>,

    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create application state around an already constructed store
    pub fn new(config: ServerConfig, store: impl UserStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}
