use std::future::{ready, Ready};
use std::sync::Arc;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::extractors::app_state::app_state;
use crate::services::games::LiveGame;
use crate::utils::game_id::is_valid_game_id;

/// Game named by the `{id}` path segment, looked up in the registry.
/// Unknown or malformed identifiers are rejected with `GAME_NOT_FOUND`.
#[derive(Clone)]
pub struct GameHandle(pub Arc<LiveGame>);

impl GameHandle {
    fn extract(req: &HttpRequest) -> Result<GameHandle, AppError> {
        let id = req.match_info().get("id").unwrap_or_default();
        if !is_valid_game_id(id) {
            return Err(DomainError::game_not_found(id).into());
        }
        let state = app_state(req)?;
        Ok(GameHandle(state.games().lookup(id)?))
    }
}

impl FromRequest for GameHandle {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Self::extract(req))
    }
}

impl std::ops::Deref for GameHandle {
    type Target = LiveGame;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
