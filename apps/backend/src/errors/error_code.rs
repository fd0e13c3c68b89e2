//! Error codes for the chess backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the chess backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// No credential was presented
    Unauthenticated,
    /// Credential could not be verified
    InvalidToken,
    /// Credential has expired
    ExpiredToken,
    /// Credential refers to a user that no longer exists
    UserNotFound,
    /// Username/password pair rejected at login
    InvalidCredentials,

    // Request Validation
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Accounts
    /// Username already registered
    UsernameTaken,
    /// Email already registered
    EmailTaken,

    // Game sessions
    /// Unknown game identifier
    GameNotFound,
    /// Both seats are already occupied
    GameFull,
    /// Move attempted before both players joined
    GameNotStarted,
    /// Caller is not seated in the game
    NotAParticipant,
    /// Caller moved out of turn
    WrongTurn,
    /// Move rejected by the rules engine
    IllegalMove,
    /// Move attempted after the game finished
    GameOver,

    // System Errors
    /// WebSocket handshake failed
    UpgradeFailed,
    /// Game identifier could not be allocated
    IdGeneration,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::ExpiredToken => "EXPIRED_TOKEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::EmailTaken => "EMAIL_TAKEN",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::GameFull => "GAME_FULL",
            Self::GameNotStarted => "GAME_NOT_STARTED",
            Self::NotAParticipant => "NOT_A_PARTICIPANT",
            Self::WrongTurn => "WRONG_TURN",
            Self::IllegalMove => "ILLEGAL_MOVE",
            Self::GameOver => "GAME_OVER",

            Self::UpgradeFailed => "UPGRADE_FAILED",
            Self::IdGeneration => "ID_GENERATION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
