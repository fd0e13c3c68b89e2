//! Process-wide table of live games.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::{info, warn};

use crate::domain::{GameSession, GameSettings};
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::services::games::LiveGame;
use crate::utils::game_id::generate_game_id;

/// Collisions tolerated before `create` gives up.
const MAX_ID_ATTEMPTS: usize = 8;

/// Source of candidate game identifiers.
pub trait GameIdSource: Send + Sync {
    fn next_id(&self) -> Result<String, DomainError>;
}

/// Draws identifiers from the OS RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRngIds;

impl GameIdSource for OsRngIds {
    fn next_id(&self) -> Result<String, DomainError> {
        generate_game_id()
    }
}

pub struct GameRegistry {
    games: DashMap<String, Arc<LiveGame>>,
    ids: Box<dyn GameIdSource>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::with_id_source(OsRngIds)
    }

    pub fn with_id_source(ids: impl GameIdSource + 'static) -> Self {
        Self {
            games: DashMap::new(),
            ids: Box::new(ids),
        }
    }

    /// Register a new empty game and return its identifier.
    pub fn create(&self, settings: GameSettings) -> Result<String, DomainError> {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let candidate = self.ids.next_id()?;
            match self.games.entry(candidate) {
                Entry::Occupied(taken) => {
                    warn!(game_id = %taken.key(), attempt, "game id collision");
                }
                Entry::Vacant(slot) => {
                    let id = slot.key().clone();
                    slot.insert(Arc::new(LiveGame::new(GameSession::new(
                        id.clone(),
                        settings,
                    ))));
                    info!(
                        game_id = %id,
                        initial_time = settings.time_control.initial_minutes,
                        time_control = settings.time_control.increment_seconds,
                        color = %settings.color_preference,
                        "game created"
                    );
                    return Ok(id);
                }
            }
        }

        Err(DomainError::infra(
            InfraErrorKind::IdGeneration,
            format!("no unique game id after {MAX_ID_ATTEMPTS} attempts"),
        ))
    }

    pub fn lookup(&self, id: &str) -> Result<Arc<LiveGame>, DomainError> {
        self.games
            .get(id)
            .map(|game| Arc::clone(game.value()))
            .ok_or_else(|| DomainError::game_not_found(id))
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new()
    }
}
