//! Argon2 password hashing.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

use crate::errors::domain::{DomainError, InfraErrorKind};

/// Hash `password` into a PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, DomainError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            DomainError::infra(
                InfraErrorKind::Other("password".to_string()),
                format!("failed to hash password: {e}"),
            )
        })
}

/// Check `password` against a stored PHC string. An unparsable hash is an
/// infrastructure error, a mismatch is `Ok(false)`.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, DomainError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::Other("password".to_string()),
            format!("invalid stored hash: {e}"),
        )
    })?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
