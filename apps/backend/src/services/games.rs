//! A registered game: its session plus the connections watching it, behind
//! one lock.

use parking_lot::Mutex;
use time::OffsetDateTime;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{GameSession, JoinOutcome, MoveOutcome, SessionSnapshot};
use crate::errors::domain::DomainError;
use crate::ws::hub::{ConnectionHub, FrameSink};
use crate::ws::protocol::ServerFrame;

struct GameRoom {
    session: GameSession,
    hub: ConnectionHub,
}

pub struct LiveGame {
    id: String,
    room: Mutex<GameRoom>,
}

impl LiveGame {
    pub fn new(session: GameSession) -> Self {
        Self {
            id: session.id().to_string(),
            room: Mutex::new(GameRoom {
                session,
                hub: ConnectionHub::new(),
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn join(&self, username: &str) -> Result<JoinOutcome, DomainError> {
        let mut room = self.room.lock();
        let outcome = room.session.join(username, OffsetDateTime::now_utc())?;
        info!(
            game_id = %self.id,
            username,
            seated = ?outcome.seated,
            started = outcome.started,
            "player joined"
        );
        if outcome.started_now {
            info!(game_id = %self.id, "game started");
        }
        Ok(outcome)
    }

    pub fn attach(&self, conn_id: Uuid, sink: Box<dyn FrameSink>) {
        let mut room = self.room.lock();
        room.hub.attach(conn_id, sink);
        debug!(game_id = %self.id, %conn_id, connections = room.hub.len(), "connection attached");
    }

    pub fn detach(&self, conn_id: &Uuid) {
        let mut room = self.room.lock();
        if room.hub.detach(conn_id) {
            debug!(game_id = %self.id, %conn_id, connections = room.hub.len(), "connection detached");
        }
    }

    pub fn connection_count(&self) -> usize {
        self.room.lock().hub.len()
    }

    /// Validate and apply a move, then fan the new position out to every
    /// attached connection.
    ///
    /// Validation and broadcast happen under the same lock, so frames reach
    /// each connection in move order. Rejections are returned to the caller
    /// and never broadcast.
    pub fn play_move(&self, username: &str, move_text: &str) -> Result<MoveOutcome, DomainError> {
        let mut room = self.room.lock();
        let result = room.session.play_move(username, move_text)?;

        let report = room.hub.broadcast(&ServerFrame::moved(&result));
        if !report.failed.is_empty() {
            warn!(
                game_id = %self.id,
                failed = report.failed.len(),
                delivered = report.delivered,
                "broadcast skipped closed connections"
            );
        }
        info!(
            game_id = %self.id,
            username,
            mv = move_text,
            fen = %result.fen,
            outcome = ?result.outcome,
            "move applied"
        );
        Ok(result)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.room.lock().session.snapshot()
    }
}
