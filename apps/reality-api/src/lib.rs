pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod server;
pub mod services;

use std::sync::Arc;

use config::Config;
use db::slot::StoreSlot;
use db::store::ShowStore;
use error::ApiError;
use reality_common::SnowflakeGenerator;

/// Shared application state available to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: StoreSlot,
    pub config: Arc<Config>,
    pub snowflake: Arc<SnowflakeGenerator>,
}

impl AppState {
    pub fn new(store: StoreSlot, config: Config) -> Self {
        let snowflake = Arc::new(SnowflakeGenerator::new(config.worker_id));
        Self {
            store,
            config: Arc::new(config),
            snowflake,
        }
    }

    /// The connected store, or 503 while the connection is still pending.
    pub fn store(&self) -> Result<Arc<dyn ShowStore>, ApiError> {
        self.store
            .get()
            .ok_or_else(|| ApiError::service_unavailable("Database is not connected yet"))
    }
}
