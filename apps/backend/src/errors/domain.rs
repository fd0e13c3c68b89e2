//! Domain-level error type used across the session engine and services.
//!
//! This error type is HTTP-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    /// The OS random source failed or identifiers kept colliding.
    IdGeneration,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    User,
    Game,
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    GameFull,
    UsernameTaken,
    EmailTaken,
}

/// Why a credential could not be resolved to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    Missing,
    Invalid,
    Expired,
    UnknownUser,
    BadCredentials,
}

/// Reasons a move is refused by the turn state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveRejection {
    GameNotStarted,
    NotAParticipant,
    /// Carries the side whose turn it actually is.
    WrongTurn(&'static str),
    IllegalMove(String),
    GameOver,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation failure
    Validation(String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Credential missing or not resolvable
    Unauthenticated(AuthFailure),
    /// Move refused by the session
    Move(MoveRejection),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for MoveRejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            MoveRejection::GameNotStarted => write!(f, "game has not started"),
            MoveRejection::NotAParticipant => write!(f, "user is not part of the game"),
            MoveRejection::WrongTurn(side) => write!(f, "not your turn: {side} to move"),
            MoveRejection::IllegalMove(d) => write!(f, "error making move {d}"),
            MoveRejection::GameOver => write!(f, "game is already over"),
        }
    }
}

impl Display for AuthFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            AuthFailure::Missing => write!(f, "user has no JWT"),
            AuthFailure::Invalid => write!(f, "invalid JWT"),
            AuthFailure::Expired => write!(f, "JWT has expired"),
            AuthFailure::UnknownUser => write!(f, "user in JWT does not exist"),
            AuthFailure::BadCredentials => write!(f, "invalid username or password"),
        }
    }
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(d) => write!(f, "{d}"),
            DomainError::Conflict(_, d) => write!(f, "{d}"),
            DomainError::NotFound(_, d) => write!(f, "{d}"),
            DomainError::Unauthenticated(reason) => write!(f, "{reason}"),
            DomainError::Move(rejection) => write!(f, "{rejection}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }
    pub fn unauthenticated(reason: AuthFailure) -> Self {
        Self::Unauthenticated(reason)
    }
    pub fn rejected(rejection: MoveRejection) -> Self {
        Self::Move(rejection)
    }

    pub fn game_not_found(id: &str) -> Self {
        Self::not_found(NotFoundKind::Game, format!("game {id} does not exist"))
    }
}
