//! Account registration and login.

use std::time::SystemTime;

use lazy_regex::regex_is_match;
use tracing::{debug, info};

use crate::auth::jwt::mint_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::errors::domain::{AuthFailure, DomainError};
use crate::logging::pii::Redacted;
use crate::repos::users::{NewUser, User, UserStore};
use crate::state::security_config::SecurityConfig;

pub const REGISTER_USERNAME_LEN: (usize, usize) = (4, 20);
pub const LOGIN_USERNAME_LEN: (usize, usize) = (4, 32);
pub const PASSWORD_LEN: (usize, usize) = (8, 64);

pub fn check_len(field: &str, value: &str, (min, max): (usize, usize)) -> Result<(), DomainError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(DomainError::validation(format!(
            "{field} must be between {min} and {max} characters"
        )));
    }
    Ok(())
}

pub fn check_email(email: &str) -> Result<(), DomainError> {
    if regex_is_match!(r"^[^\s@]+@[^\s@]+\.[^\s@]+$", email) {
        Ok(())
    } else {
        Err(DomainError::validation("email must be a valid email address"))
    }
}

/// Create an account. Field bounds are checked here as well as at the
/// HTTP boundary.
pub async fn register(
    store: &dyn UserStore,
    username: &str,
    email: &str,
    password: &str,
) -> Result<User, DomainError> {
    check_len("username", username, REGISTER_USERNAME_LEN)?;
    check_email(email)?;
    check_len("password", password, PASSWORD_LEN)?;

    let user = store
        .create_user(NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: hash_password(password)?,
        })
        .await?;

    info!(
        user_id = %user.id,
        username = %user.username,
        email = %Redacted(&user.email),
        "user registered"
    );
    Ok(user)
}

/// Check credentials and mint an access token.
///
/// Unknown usernames and wrong passwords are indistinguishable to the caller.
pub async fn login(
    store: &dyn UserStore,
    security: &SecurityConfig,
    username: &str,
    password: &str,
) -> Result<String, DomainError> {
    check_len("username", username, LOGIN_USERNAME_LEN)?;
    check_len("password", password, PASSWORD_LEN)?;

    let bad_credentials = || DomainError::unauthenticated(AuthFailure::BadCredentials);

    let Some(user) = store.get_user_by_username(username).await? else {
        debug!(username, "login for unknown user");
        return Err(bad_credentials());
    };
    if !verify_password(password, &user.password_hash)? {
        debug!(user_id = %user.id, "login with wrong password");
        return Err(bad_credentials());
    }

    let token = mint_access_token(&user.id, &user.username, SystemTime::now(), security)?;
    info!(user_id = %user.id, "user logged in");
    Ok(token)
}
