use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::domain::{AuthFailure, DomainError, InfraErrorKind};
use crate::state::security_config::SecurityConfig;

/// Claims included in our backend-issued access tokens.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// User identifier
    pub sub: String,
    /// Username at the time the token was minted. Display only; the current
    /// username is always resolved through `sub`.
    pub username: String,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Mint a JWT access token valid for `security.token_ttl_secs`.
pub fn mint_access_token(
    user_id: &str,
    username: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, DomainError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| {
            DomainError::infra(
                InfraErrorKind::Other("clock".to_string()),
                "system time is before the unix epoch",
            )
        })?
        .as_secs() as i64;

    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        iat,
        exp: iat + security.token_ttl_secs,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| {
        DomainError::infra(
            InfraErrorKind::Other("jwt".to_string()),
            format!("failed to encode JWT: {e}"),
        )
    })
}

/// Verify a JWT and return its claims.
///
/// Expired tokens map to [`AuthFailure::Expired`]; every other decode
/// failure (bad signature, malformed, wrong algorithm) to
/// [`AuthFailure::Invalid`].
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, DomainError> {
    // Default Validation already checks exp; pin algorithm to configured algorithm.
    let mut validation = Validation::new(security.algorithm);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => DomainError::unauthenticated(AuthFailure::Expired),
        _ => DomainError::unauthenticated(AuthFailure::Invalid),
    })
}
