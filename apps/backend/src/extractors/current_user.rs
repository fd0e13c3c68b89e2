use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use tracing::debug;

use crate::auth::jwt::verify_access_token;
use crate::error::AppError;
use crate::errors::domain::{AuthFailure, DomainError};
use crate::extractors::app_state::app_state;
use crate::extractors::auth_token::AuthToken;
use crate::state::app_state::AppState;

/// Authenticated caller, resolved from the bearer credential through the
/// user store on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
}

impl CurrentUser {
    pub async fn resolve(token: &AuthToken, state: &AppState) -> Result<CurrentUser, DomainError> {
        let claims = verify_access_token(&token.token, &state.security)?;
        let user = state
            .users()
            .get_user_by_id(&claims.sub)
            .await?
            .ok_or(DomainError::unauthenticated(AuthFailure::UnknownUser))?;
        Ok(CurrentUser {
            id: user.id,
            username: user.username,
        })
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let state = app_state(&req)?;
            let token = AuthToken::from_http(&req)?
                .ok_or(DomainError::unauthenticated(AuthFailure::Missing))?;
            Ok(CurrentUser::resolve(&token, &state).await?)
        })
    }
}

/// Caller if a credential resolves, otherwise `None`. Never rejects the
/// request on credential problems; storage failures still propagate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaybeUser(pub Option<CurrentUser>);

impl FromRequest for MaybeUser {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let state = app_state(&req)?;
            let token = match AuthToken::from_http(&req) {
                Ok(Some(token)) => token,
                Ok(None) => return Ok(MaybeUser(None)),
                Err(reason) => {
                    debug!(%reason, "ignoring unusable credential");
                    return Ok(MaybeUser(None));
                }
            };

            match CurrentUser::resolve(&token, &state).await {
                Ok(user) => Ok(MaybeUser(Some(user))),
                Err(DomainError::Unauthenticated(reason)) => {
                    debug!(%reason, "ignoring unresolvable credential");
                    Ok(MaybeUser(None))
                }
                Err(other) => Err(other.into()),
            }
        })
    }
}
