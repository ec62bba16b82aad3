use crate::config::ServerConfig;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state. Built once in `main`, handed to the router;
/// handlers pass the pool into repositories explicitly.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create a new app state
    pub fn new(pool: PgPool, config: ServerConfig) -> Self {
        Self {
            pool,
            config: Arc::new(config),
        }
    }
}
