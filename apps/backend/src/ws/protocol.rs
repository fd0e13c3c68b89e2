//! Wire format of the game WebSocket.
//!
//! Inbound: `{"type": "move", "move": "<SAN or UCI>"}`.
//! Outbound: `{"success", "message", "status"}`, plus `outcome` on the frame
//! for a game-ending move.

use actix::Message;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::domain::{MoveOutcome, Outcome};
use crate::AppError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMsg {
    Move { mv: String },
}

/// Decode failures. All are recoverable: the connection stays open.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("error reading message: {0}")]
    Malformed(String),
    #[error("missing or invalid message type")]
    MissingType,
    #[error("missing type ('move')")]
    UnknownType(String),
    #[error("no move in request")]
    MissingMove,
}

pub fn decode_client_msg(text: &str) -> Result<ClientMsg, DecodeError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| DecodeError::Malformed(e.to_string()))?;
    let Value::Object(fields) = value else {
        return Err(DecodeError::Malformed("expected a JSON object".to_string()));
    };

    match fields.get("type").and_then(Value::as_str) {
        None => Err(DecodeError::MissingType),
        Some("move") => fields
            .get("move")
            .and_then(Value::as_str)
            .map(|mv| ClientMsg::Move { mv: mv.to_string() })
            .ok_or(DecodeError::MissingMove),
        Some(other) => Err(DecodeError::UnknownType(other.to_string())),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Message)]
#[rtype(result = "()")]
pub struct ServerFrame {
    pub success: bool,
    pub message: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
}

impl ServerFrame {
    /// Success frame carrying the new position's FEN.
    pub fn moved(result: &MoveOutcome) -> Self {
        Self {
            success: true,
            message: result.fen.clone(),
            status: 200,
            outcome: result.outcome.is_terminal().then_some(result.outcome),
        }
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            status,
            outcome: None,
        }
    }

    pub fn to_json(&self) -> String {
        // Plain struct of strings and integers; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(
                r#"{{"success":{},"message":"","status":{}}}"#,
                self.success, self.status
            )
        })
    }
}

impl From<&AppError> for ServerFrame {
    fn from(err: &AppError) -> Self {
        Self::error(err.status().as_u16(), err.detail())
    }
}

impl From<DecodeError> for ServerFrame {
    fn from(err: DecodeError) -> Self {
        Self::error(400, err.to_string())
    }
}
