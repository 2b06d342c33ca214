//! User-repository port.
//!
//! Persistent storage of user records and their password hashes is an
//! external collaborator; this module defines the operations the service
//! needs from it plus an in-memory implementation that backs the default
//! wiring and the tests. A database-backed implementation plugs in behind
//! the same trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use thiserror::Error;
use tokio::sync::RwLock;

/// A stored user record.
///
/// The password hash never serializes into responses. The refresh verifier is
/// the session record: one per identity, overwritten on every login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Identity, immutable for the lifetime of a session
    pub id: i64,
    /// Login email, unique
    pub email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Current refresh verifier, if a login has happened
    #[serde(skip_serializing, default)]
    pub refresh_verifier: Option<String>,
    pub active: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a user.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Plaintext password, hashed by the repository before storage
    pub password: String,
    #[serde(default)]
    pub active: i32,
}

/// Repository failures.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// No record for the given key
    #[error("User not found")]
    NotFound,

    /// A record with the same email already exists
    #[error("Email already registered")]
    DuplicateEmail,

    /// Storage backend fault
    #[error("Repository backend error: {0}")]
    Backend(String),
}

/// Operations the credential service needs from user storage.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user, returning its identity.
    async fn insert(&self, new_user: NewUser) -> Result<i64, RepositoryError>;

    /// Look up a user by email.
    async fn get_by_email(&self, email: &str) -> Result<User, RepositoryError>;

    /// Check a plaintext password against the stored hash.
    async fn password_matches(&self, plain: &str, user: &User) -> Result<bool, RepositoryError>;

    /// Overwrite the refresh verifier in the identity's session record.
    async fn update_refresh_verifier(&self, id: i64, verifier: &str)
        -> Result<(), RepositoryError>;

    /// Read the current refresh verifier for an identity.
    async fn get_refresh_verifier(&self, id: i64) -> Result<Option<String>, RepositoryError>;

    /// List all users.
    async fn get_all(&self) -> Result<Vec<User>, RepositoryError>;
}

/// In-memory repository keyed by identity.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<i64, User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, new_user: NewUser) -> Result<i64, RepositoryError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == new_user.email) {
            return Err(RepositoryError::DuplicateEmail);
        }

        let password_hash = bcrypt::hash(&new_user.password, bcrypt::DEFAULT_COST)
            .map_err(|e| RepositoryError::Backend(e.to_string()))?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        users.insert(
            id,
            User {
                id,
                email: new_user.email,
                first_name: new_user.first_name,
                last_name: new_user.last_name,
                password_hash,
                refresh_verifier: None,
                active: new_user.active,
                created_at: now,
                updated_at: now,
            },
        );
        Ok(id)
    }

    async fn get_by_email(&self, email: &str) -> Result<User, RepositoryError> {
        let users = self.users.read().await;
        users
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn password_matches(&self, plain: &str, user: &User) -> Result<bool, RepositoryError> {
        bcrypt::verify(plain, &user.password_hash)
            .map_err(|e| RepositoryError::Backend(e.to_string()))
    }

    async fn update_refresh_verifier(
        &self,
        id: i64,
        verifier: &str,
    ) -> Result<(), RepositoryError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        user.refresh_verifier = Some(verifier.to_string());
        user.updated_at = Utc::now();
        Ok(())
    }

    async fn get_refresh_verifier(&self, id: i64) -> Result<Option<String>, RepositoryError> {
        let users = self.users.read().await;
        let user = users.get(&id).ok_or(RepositoryError::NotFound)?;
        Ok(user.refresh_verifier.clone())
    }

    async fn get_all(&self) -> Result<Vec<User>, RepositoryError> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by_key(|u| u.id);
        Ok(all)
    }
}
