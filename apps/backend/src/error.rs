use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::errors::domain::{
    AuthFailure, ConflictKind, DomainError, InfraErrorKind, MoveRejection, NotFoundKind,
};
use crate::errors::ErrorCode;
use crate::trace_ctx;

#[derive(Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

/// Error type returned by every HTTP handler and extractor.
///
/// Client-caused failures (including unknown games and unresolvable
/// credentials) are rendered as 400; infrastructure failures as 500.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Unauthenticated: {detail}")]
    Unauthenticated { code: ErrorCode, detail: String },
    #[error("Internal error: {detail}")]
    Internal { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::BadRequest { code, .. } => *code,
            AppError::Unauthenticated { code, .. } => *code,
            AppError::Internal { code, .. } => *code,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            AppError::Validation { detail, .. } => detail.clone(),
            AppError::BadRequest { detail, .. } => detail.clone(),
            AppError::Unauthenticated { detail, .. } => detail.clone(),
            AppError::Internal { detail, .. } => detail.clone(),
            AppError::Config { detail } => detail.clone(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated { .. } => StatusCode::BAD_REQUEST,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn invalid(detail: impl Into<String>) -> Self {
        Self::Validation {
            code: ErrorCode::ValidationError,
            detail: detail.into(),
        }
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn unauthenticated(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Unauthenticated {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Internal {
            code,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let detail = err.to_string();
        match err {
            DomainError::Validation(_) => AppError::invalid(detail),
            DomainError::Conflict(kind, _) => {
                let code = match kind {
                    ConflictKind::GameFull => ErrorCode::GameFull,
                    ConflictKind::UsernameTaken => ErrorCode::UsernameTaken,
                    ConflictKind::EmailTaken => ErrorCode::EmailTaken,
                };
                AppError::bad_request(code, detail)
            }
            DomainError::NotFound(kind, _) => {
                let code = match kind {
                    NotFoundKind::Game => ErrorCode::GameNotFound,
                    NotFoundKind::User => ErrorCode::UserNotFound,
                };
                AppError::bad_request(code, detail)
            }
            DomainError::Unauthenticated(reason) => {
                let code = match reason {
                    AuthFailure::Missing => ErrorCode::Unauthenticated,
                    AuthFailure::Invalid => ErrorCode::InvalidToken,
                    AuthFailure::Expired => ErrorCode::ExpiredToken,
                    AuthFailure::UnknownUser => ErrorCode::UserNotFound,
                    AuthFailure::BadCredentials => ErrorCode::InvalidCredentials,
                };
                AppError::unauthenticated(code, detail)
            }
            DomainError::Move(rejection) => {
                let code = match rejection {
                    MoveRejection::GameNotStarted => ErrorCode::GameNotStarted,
                    MoveRejection::NotAParticipant => ErrorCode::NotAParticipant,
                    MoveRejection::WrongTurn(_) => ErrorCode::WrongTurn,
                    MoveRejection::IllegalMove(_) => ErrorCode::IllegalMove,
                    MoveRejection::GameOver => ErrorCode::GameOver,
                };
                AppError::bad_request(code, detail)
            }
            DomainError::Infra(kind, _) => {
                let code = match kind {
                    InfraErrorKind::IdGeneration => ErrorCode::IdGeneration,
                    _ => ErrorCode::Internal,
                };
                AppError::internal(code, detail)
            }
        }
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code().as_str();
        let detail = self.detail();
        let trace_id = trace_ctx::trace_id();

        let problem_details = ProblemDetails {
            type_: format!("https://chess.invalid/errors/{code}"),
            title: Self::humanize_code(code),
            status: status.as_u16(),
            detail,
            code: code.to_string(),
            trace_id: trace_id.clone(),
        };

        HttpResponse::build(status)
            .content_type("application/problem+json")
            .insert_header(("x-trace-id", trace_id))
            .json(problem_details)
    }
}
