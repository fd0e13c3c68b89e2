//! One actor per game socket connection.
//!
//! The actor attaches its mailbox to the game's hub when it starts and
//! detaches when it stops, whichever way the connection ends. Inbound
//! frames are handled one at a time; replies to a bad message go to this
//! connection only, while accepted moves are fanned out by the hub.

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web_actors::ws;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::domain::{DomainError, MoveRejection};
use crate::services::games::LiveGame;
use crate::ws::protocol::{decode_client_msg, ClientMsg, ServerFrame};
use crate::AppError;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub struct GameSocket {
    conn_id: Uuid,
    game: Arc<LiveGame>,
    /// `None` for spectators.
    username: Option<String>,
    last_heartbeat: Instant,
}

impl GameSocket {
    pub fn new(conn_id: Uuid, game: Arc<LiveGame>, username: Option<String>) -> Self {
        Self {
            conn_id,
            game,
            username,
            last_heartbeat: Instant::now(),
        }
    }

    fn send(ctx: &mut ws::WebsocketContext<Self>, frame: &ServerFrame) {
        ctx.text(frame.to_json());
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(
                    conn_id = %actor.conn_id,
                    game_id = %actor.game.id(),
                    "heartbeat timed out"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn handle_text(&mut self, text: &str, ctx: &mut ws::WebsocketContext<Self>) {
        let mv = match decode_client_msg(text) {
            Ok(ClientMsg::Move { mv }) => mv,
            Err(err) => {
                debug!(conn_id = %self.conn_id, error = %err, "undecodable client message");
                Self::send(ctx, &ServerFrame::from(err));
                return;
            }
        };

        let result = match self.username.as_deref() {
            Some(username) => self.game.play_move(username, &mv),
            None => Err(DomainError::rejected(MoveRejection::NotAParticipant)),
        };

        // Accepted moves reach this connection through the hub broadcast.
        if let Err(err) = result {
            let err = AppError::from(err);
            debug!(
                conn_id = %self.conn_id,
                game_id = %self.game.id(),
                username = self.username.as_deref().unwrap_or("<spectator>"),
                mv = %mv,
                code = %err.code(),
                "move rejected"
            );
            Self::send(ctx, &ServerFrame::from(&err));
        }
    }
}

impl Actor for GameSocket {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        let recipient = ctx.address().recipient::<ServerFrame>();
        self.game.attach(self.conn_id, Box::new(recipient));
        self.start_heartbeat(ctx);

        info!(
            conn_id = %self.conn_id,
            game_id = %self.game.id(),
            username = self.username.as_deref().unwrap_or("<spectator>"),
            "websocket started"
        );
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.game.detach(&self.conn_id);
        info!(
            conn_id = %self.conn_id,
            game_id = %self.game.id(),
            "websocket stopped"
        );
    }
}

impl Handler<ServerFrame> for GameSocket {
    type Result = ();

    fn handle(&mut self, frame: ServerFrame, ctx: &mut Self::Context) -> Self::Result {
        Self::send(ctx, &frame);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for GameSocket {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                self.handle_text(&text, ctx);
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                Self::send(
                    ctx,
                    &ServerFrame::error(400, "binary frames are not supported"),
                );
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(
                    conn_id = %self.conn_id,
                    game_id = %self.game.id(),
                    error = %err,
                    "websocket protocol error"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}
