//! Application state management
//!
//! This module defines the central application state shared across all
//! handlers of a service built on Stratum.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use stratum_core::PushManager;

use super::config::Configuration;

/// Application state shared across all handlers
pub struct AppState {
    pub configuration: Configuration,
    pub db: DatabaseConnection,
    pub push: Arc<PushManager>,
}

impl AppState {
    pub fn new(configuration: Configuration, db: DatabaseConnection) -> Self {
        Self {
            configuration,
            db,
            push: Arc::new(PushManager::new()),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("configuration", &self.configuration)
            .field("db", &"<DatabaseConnection>")
            .field("push_connections", &self.push.connection_count())
            .finish()
    }
}

impl Clone for AppState {
    fn clone(&self) -> Self {
        Self {
            configuration: self.configuration.clone(),
            db: self.db.clone(),
            push: self.push.clone(),
        }
    }
}
