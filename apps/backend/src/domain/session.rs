//! Game session state machine: seat assignment, game start and turn-gated
//! move application.
//!
//! Pure and synchronous. Callers own the locking; every method here assumes
//! it runs under the session's mutation guard.

use serde::Serialize;
use time::OffsetDateTime;

use crate::domain::clock::{ClockBook, TimeControl};
use crate::domain::color::Color;
use crate::domain::position::{Outcome, Position};
use crate::errors::domain::{ConflictKind, DomainError, MoveRejection};

/// Configuration captured when the game is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    pub time_control: TimeControl,
    /// Decides seat assignment order only.
    pub color_preference: Color,
}

/// Lifecycle of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for both seats to fill. No board exists yet.
    Created,
    /// Both players seated; moves are accepted.
    Active { position: Position, clock: ClockBook },
    /// A terminal outcome was reached. The position is frozen.
    Finished {
        position: Position,
        clock: ClockBook,
        outcome: Outcome,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinOutcome {
    /// Seat assigned by this call, `None` if the caller was not seated.
    pub seated: Option<Color>,
    pub started: bool,
    /// True only for the join that filled the second seat.
    pub started_now: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub mover: Color,
    /// Full FEN of the position after the move.
    pub fen: String,
    /// Side to move next.
    pub turn: Color,
    pub outcome: Outcome,
}

/// Point-in-time view of a session for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub id: String,
    pub white: Option<String>,
    pub black: Option<String>,
    pub color_preference: Color,
    pub started: bool,
    pub turn: Option<Color>,
    pub fen: Option<String>,
    pub outcome: Option<Outcome>,
    pub initial_time: u32,
    pub time_control: u32,
    pub clock: Option<ClockBook>,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    id: String,
    settings: GameSettings,
    white: Option<String>,
    black: Option<String>,
    phase: Phase,
}

impl GameSession {
    pub fn new(id: impl Into<String>, settings: GameSettings) -> Self {
        Self {
            id: id.into(),
            settings,
            white: None,
            black: None,
            phase: Phase::Created,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn seat(&self, color: Color) -> Option<&str> {
        match color {
            Color::White => self.white.as_deref(),
            Color::Black => self.black.as_deref(),
        }
    }

    pub fn is_started(&self) -> bool {
        !matches!(self.phase, Phase::Created)
    }

    pub fn position(&self) -> Option<&Position> {
        match &self.phase {
            Phase::Created => None,
            Phase::Active { position, .. } | Phase::Finished { position, .. } => Some(position),
        }
    }

    pub fn clock(&self) -> Option<&ClockBook> {
        match &self.phase {
            Phase::Created => None,
            Phase::Active { clock, .. } | Phase::Finished { clock, .. } => Some(clock),
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match &self.phase {
            Phase::Finished { outcome, .. } => Some(*outcome),
            _ => None,
        }
    }

    /// Side to move, or `None` before the game starts.
    pub fn turn(&self) -> Option<Color> {
        self.position().map(Position::side_to_move)
    }

    pub fn color_of(&self, username: &str) -> Option<Color> {
        if self.white.as_deref() == Some(username) {
            Some(Color::White)
        } else if self.black.as_deref() == Some(username) {
            Some(Color::Black)
        } else {
            None
        }
    }

    /// Seat `username`, starting the game when the second seat fills.
    ///
    /// The preferred seat is filled first. The complementary seat is only
    /// given to a username not already seated. A caller who is already
    /// seated gets `seated: None` and no error.
    pub fn join(
        &mut self,
        username: &str,
        now: OffsetDateTime,
    ) -> Result<JoinOutcome, DomainError> {
        if username.is_empty() {
            return Err(DomainError::validation("username must not be empty"));
        }
        if self.white.is_some() && self.black.is_some() {
            return Err(DomainError::conflict(
                ConflictKind::GameFull,
                "game already full",
            ));
        }

        let preferred = self.settings.color_preference;
        let other = preferred.opposite();
        let seated = if self.seat(preferred).is_none() && self.seat(other) != Some(username) {
            Some(preferred)
        } else if self.seat(other).is_none() && self.seat(preferred) != Some(username) {
            Some(other)
        } else {
            None
        };
        // The clock is the only fallible step; build it before touching seats.
        let fills_last_seat = seated.is_some()
            && (self.white.is_some() || self.black.is_some())
            && matches!(self.phase, Phase::Created);
        let clock = if fills_last_seat {
            Some(ClockBook::start(self.settings.time_control, now)?)
        } else {
            None
        };

        if let Some(color) = seated {
            *self.slot_mut(color) = Some(username.to_string());
        }

        let started_now = clock.is_some();
        if let Some(clock) = clock {
            self.phase = Phase::Active {
                position: Position::starting(),
                clock,
            };
        }

        Ok(JoinOutcome {
            seated,
            started: self.is_started(),
            started_now,
        })
    }

    /// Validate and apply one move on behalf of `username`.
    ///
    /// Checks run in order: started, participant, not finished, turn, rules.
    /// A rejected move leaves the session untouched.
    pub fn play_move(
        &mut self,
        username: &str,
        move_text: &str,
    ) -> Result<MoveOutcome, DomainError> {
        if !self.is_started() {
            return Err(DomainError::rejected(MoveRejection::GameNotStarted));
        }
        let mover = self
            .color_of(username)
            .ok_or_else(|| DomainError::rejected(MoveRejection::NotAParticipant))?;
        let Phase::Active { position, clock } = &self.phase else {
            return Err(DomainError::rejected(MoveRejection::GameOver));
        };

        let to_move = position.side_to_move();
        if mover != to_move {
            return Err(DomainError::rejected(MoveRejection::WrongTurn(
                to_move.as_str(),
            )));
        }

        let next = position
            .apply(move_text)
            .map_err(|e| DomainError::rejected(MoveRejection::IllegalMove(e.to_string())))?;
        let clock = *clock;
        let outcome = next.outcome();
        let result = MoveOutcome {
            mover,
            fen: next.to_fen(),
            turn: next.side_to_move(),
            outcome,
        };

        self.phase = if outcome.is_terminal() {
            Phase::Finished {
                position: next,
                clock,
                outcome,
            }
        } else {
            Phase::Active {
                position: next,
                clock,
            }
        };
        Ok(result)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id.clone(),
            white: self.white.clone(),
            black: self.black.clone(),
            color_preference: self.settings.color_preference,
            started: self.is_started(),
            turn: self.turn(),
            fen: self.position().map(Position::to_fen),
            outcome: self.outcome(),
            initial_time: self.settings.time_control.initial_minutes,
            time_control: self.settings.time_control.increment_seconds,
            clock: self.clock().copied(),
        }
    }

    fn slot_mut(&mut self, color: Color) -> &mut Option<String> {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
}
