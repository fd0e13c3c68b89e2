//! User accounts storage.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::errors::domain::{ConflictKind, DomainError};

/// User domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Account lookup and creation. Lookups return `Ok(None)` for a miss;
/// errors are reserved for storage failures and uniqueness conflicts.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>, DomainError>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    /// Fails with a `Conflict` if the username or email is already taken.
    async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError>;
}

#[derive(Default)]
struct Tables {
    by_id: HashMap<String, User>,
    id_by_username: HashMap<String, String>,
    id_by_email: HashMap<String, String>,
}

/// Process-local store. Accounts live until the process exits.
#[derive(Default)]
pub struct InMemoryUserStore {
    tables: RwLock<Tables>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lookup(&self, index: impl Fn(&Tables) -> Option<&String>) -> Option<User> {
        let tables = self.tables.read();
        index(&tables).and_then(|id| tables.by_id.get(id)).cloned()
    }
}

// Email uniqueness is case-insensitive.
fn email_key(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get_user_by_id(&self, id: &str) -> Result<Option<User>, DomainError> {
        Ok(self.tables.read().by_id.get(id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self.lookup(|t| t.id_by_username.get(username)))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let key = email_key(email);
        Ok(self.lookup(|t| t.id_by_email.get(&key)))
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        let mut tables = self.tables.write();
        let key = email_key(&new_user.email);

        if tables.id_by_email.contains_key(&key) {
            return Err(DomainError::conflict(
                ConflictKind::EmailTaken,
                format!("user with email {} already exists", new_user.email),
            ));
        }
        if tables.id_by_username.contains_key(&new_user.username) {
            return Err(DomainError::conflict(
                ConflictKind::UsernameTaken,
                format!("user with username {} already exists", new_user.username),
            ));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        tables
            .id_by_username
            .insert(user.username.clone(), user.id.clone());
        tables.id_by_email.insert(key, user.id.clone());
        tables.by_id.insert(user.id.clone(), user.clone());
        Ok(user)
    }
}
