use std::sync::Arc;

use super::security_config::SecurityConfig;
use crate::repos::users::UserStore;
use crate::services::registry::GameRegistry;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Live games, shared by every request and WebSocket actor
    pub games: Arc<GameRegistry>,
    /// Account storage
    pub users: Arc<dyn UserStore>,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
}

impl AppState {
    pub fn new(
        games: Arc<GameRegistry>,
        users: Arc<dyn UserStore>,
        security: SecurityConfig,
    ) -> Self {
        Self {
            games,
            users,
            security,
        }
    }

    pub fn games(&self) -> &GameRegistry {
        &self.games
    }

    pub fn users(&self) -> &dyn UserStore {
        self.users.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("games", &self.games.len())
            .field("security", &self.security.algorithm)
            .finish_non_exhaustive()
    }
}
