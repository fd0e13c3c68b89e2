use std::collections::HashMap;
use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};

use crate::errors::domain::{AuthFailure, DomainError};
use crate::AppError;

/// Bearer credential presented with a request.
///
/// Read from `Authorization: Bearer <token>` or, since browsers cannot set
/// headers on a WebSocket handshake, from a `token` query parameter. The
/// header wins when both are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub token: String,
}

impl AuthToken {
    /// `Ok(None)` when no credential was presented at all.
    pub fn from_http(req: &HttpRequest) -> Result<Option<AuthToken>, DomainError> {
        if let Some(value) = req.headers().get(header::AUTHORIZATION) {
            let value = value
                .to_str()
                .map_err(|_| DomainError::unauthenticated(AuthFailure::Invalid))?;
            return parse_bearer(value).map(Some);
        }

        let query = web::Query::<HashMap<String, String>>::from_query(req.query_string())
            .map(web::Query::into_inner)
            .unwrap_or_default();
        Ok(query
            .get("token")
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(|t| AuthToken {
                token: t.to_string(),
            }))
    }
}

fn parse_bearer(value: &str) -> Result<AuthToken, DomainError> {
    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => {
            Ok(AuthToken {
                token: token.to_string(),
            })
        }
        _ => Err(DomainError::unauthenticated(AuthFailure::Invalid)),
    }
}

impl FromRequest for AuthToken {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            AuthToken::from_http(req)
                .and_then(|t| t.ok_or(DomainError::unauthenticated(AuthFailure::Missing)))
                .map_err(AppError::from),
        )
    }
}
