use std::sync::Arc;

use crate::repos::users::{InMemoryUserStore, UserStore};
use crate::services::registry::GameRegistry;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    registry: Option<Arc<GameRegistry>>,
    users: Option<Arc<dyn UserStore>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            registry: None,
            users: None,
        }
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_registry(mut self, registry: Arc<GameRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn with_user_store(mut self, users: Arc<dyn UserStore>) -> Self {
        self.users = Some(users);
        self
    }

    /// Missing collaborators default to a fresh registry and an in-memory
    /// user store.
    pub fn build(self) -> AppState {
        AppState::new(
            self.registry
                .unwrap_or_else(|| Arc::new(GameRegistry::new())),
            self.users
                .unwrap_or_else(|| Arc::new(InMemoryUserStore::new())),
            self.security_config,
        )
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
