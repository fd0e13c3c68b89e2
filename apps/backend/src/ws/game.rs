use actix_web::{web, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{GameHandle, MaybeUser};
use crate::ws::session::GameSocket;

/// `GET /api/v1/game/{id}`: upgrade to the game socket.
///
/// Unknown games are rejected before the handshake. A caller without a
/// resolvable credential is attached as a spectator.
pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    game: GameHandle,
    viewer: MaybeUser,
) -> Result<HttpResponse, AppError> {
    let conn_id = Uuid::new_v4();
    let username = viewer.0.map(|user| user.username);

    info!(
        %conn_id,
        game_id = %game.id(),
        username = username.as_deref().unwrap_or("<spectator>"),
        "websocket upgrade requested"
    );

    let socket = GameSocket::new(conn_id, game.0, username);
    ws::start(socket, &req, stream).map_err(|err| {
        warn!(%conn_id, error = %err, "websocket upgrade failed");
        AppError::internal(
            ErrorCode::UpgradeFailed,
            format!("could not upgrade to WebSocket: {err}"),
        )
    })
}
