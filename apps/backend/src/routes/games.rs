use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::domain::{Color, GameSettings, TimeControl, MAX_INITIAL_MINUTES};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::extractors::{CurrentUser, GameHandle, Validate, ValidatedJson};
use crate::state::app_state::AppState;
use crate::ws;

#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    pub game_mode: String,
    pub color: String,
    /// Minutes per side.
    pub initial_time: i64,
    /// Increment in seconds.
    pub time_control: i64,
}

impl CreateGameRequest {
    fn settings(&self) -> Result<GameSettings, DomainError> {
        let initial_minutes = u32::try_from(self.initial_time)
            .ok()
            .filter(|m| (1..=MAX_INITIAL_MINUTES).contains(m))
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "initial_time must be between 1 and {MAX_INITIAL_MINUTES} minutes"
                ))
            })?;
        let increment_seconds = u32::try_from(self.time_control)
            .map_err(|_| DomainError::validation("time_control must not be negative"))?;

        Ok(GameSettings {
            time_control: TimeControl {
                initial_minutes,
                increment_seconds,
            },
            color_preference: self.color.parse::<Color>()?,
        })
    }
}

impl Validate for CreateGameRequest {
    fn validate(&self) -> Result<(), DomainError> {
        if self.game_mode.trim().is_empty() {
            return Err(DomainError::validation("game_mode must not be empty"));
        }
        self.settings().map(|_| ())
    }
}

#[derive(Debug, Serialize)]
pub struct CreateGameResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct JoinGameResponse {
    pub id: String,
    /// Seat assigned by this call; `null` if the caller was already seated.
    pub color: Option<Color>,
    pub started: bool,
}

async fn create_game(
    body: ValidatedJson<CreateGameRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let settings = body.settings()?;
    let id = app_state.games().create(settings)?;
    Ok(HttpResponse::Created().json(CreateGameResponse { id }))
}

async fn join_game(
    game: GameHandle,
    user: CurrentUser,
) -> Result<web::Json<JoinGameResponse>, AppError> {
    let outcome = game.join(&user.username)?;
    Ok(web::Json(JoinGameResponse {
        id: game.id().to_string(),
        color: outcome.seated,
        started: outcome.started,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/create", web::post().to(create_game))
        .route("/game/{id}/join", web::post().to(join_game))
        .route("/game/{id}", web::get().to(ws::game::upgrade));
}
