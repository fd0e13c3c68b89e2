use std::time::SystemTime;

use backend_test_support::unique_helpers::{unique_email, unique_username};
use chess_backend::auth::jwt::mint_access_token;
use chess_backend::repos::users::NewUser;
use chess_backend::state::app_state::AppState;

/// A seeded account and a valid bearer token for it.
pub struct TestUser {
    pub id: String,
    pub username: String,
    pub token: String,
}

/// Insert a user straight into the store and mint a token for it.
///
/// Skips password hashing; tests that exercise login go through the
/// register endpoint instead.
pub async fn seed_user(state: &AppState, prefix: &str) -> TestUser {
    let user = state
        .users()
        .create_user(NewUser {
            username: unique_username(prefix),
            email: unique_email(prefix),
            password_hash: "not-a-real-hash".to_string(),
        })
        .await
        .expect("seed user");

    let token = mint_access_token(&user.id, &user.username, SystemTime::now(), &state.security)
        .expect("mint token");

    TestUser {
        id: user.id,
        username: user.username,
        token,
    }
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}
