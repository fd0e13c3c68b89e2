//! Game identifier generation.
//!
//! Identifiers are 10-character strings over the URL-safe base64 alphabet
//! (`A-Za-z0-9_-`), drawn from the OS's cryptographically secure RNG.

use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::errors::domain::{DomainError, InfraErrorKind};

pub const GAME_ID_LEN: usize = 10;

const URL_SAFE: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Generate a fresh game identifier.
///
/// Fails only if the OS random source is unavailable.
pub fn generate_game_id() -> Result<String, DomainError> {
    let mut bytes = [0u8; GAME_ID_LEN];
    OsRng.try_fill_bytes(&mut bytes).map_err(|e| {
        DomainError::infra(
            InfraErrorKind::IdGeneration,
            format!("OS random source failed: {e}"),
        )
    })?;

    // 64 symbols: masking to six bits keeps the distribution uniform.
    Ok(bytes
        .iter()
        .map(|b| URL_SAFE[usize::from(b & 63)] as char)
        .collect())
}

pub fn is_valid_game_id(candidate: &str) -> bool {
    candidate.len() == GAME_ID_LEN && candidate.bytes().all(|b| URL_SAFE.contains(&b))
}
