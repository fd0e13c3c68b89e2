//! Unique account data for test isolation.
//!
//! Usernames must stay within the 4-20 character window accepted by
//! registration, so the random suffix is kept short.

use uuid::Uuid;

fn short_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// Generate a unique username of the form `{prefix}{8 hex chars}`.
///
/// The prefix is truncated to 12 characters.
///
/// ```
/// use backend_test_support::unique_helpers::unique_username;
///
/// let a = unique_username("alice");
/// let b = unique_username("alice");
/// assert_ne!(a, b);
/// assert!(a.starts_with("alice"));
/// assert!(a.len() <= 20);
/// ```
pub fn unique_username(prefix: &str) -> String {
    let prefix: String = prefix.chars().take(12).collect();
    format!("{prefix}{}", short_suffix())
}

/// Generate a unique email address in the form `{prefix}-{suffix}@example.test`.
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.test", short_suffix())
}
