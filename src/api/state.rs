//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{Database, UserRepository, UserStore};
use crate::services::{AuthService, Authenticator, UserManager, UserService};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User directory service
    pub user_service: Arc<dyn UserService>,
    /// Database connection, used by the health check
    pub database: Arc<Database>,
}

impl AppState {
    /// Wire the SeaORM repository into both services.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let repo: Arc<dyn UserRepository> = Arc::new(UserStore::new(database.get_connection()));

        Self {
            auth_service: Arc::new(Authenticator::new(repo.clone(), config)),
            user_service: Arc::new(UserManager::new(repo)),
            database,
        }
    }
}
