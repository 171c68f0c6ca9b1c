//! User persistence.
//!
//! Handlers only see the [`UserStore`] trait. Email uniqueness is enforced by
//! the implementation at write time: a duplicate insert fails with
//! [`StoreError::Conflict`] no matter what an earlier lookup returned.

mod memory;
mod postgres;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

use async_trait::async_trait;
use secrecy::SecretString;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user already exists")]
    Conflict,
    #[error("store backend failure: {0}")]
    Backend(#[from] sqlx::Error),
}

/// A registered user. The password hash stays inside the crate.
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    password_hash: SecretString,
}

impl User {
    pub(crate) fn new(id: Uuid, name: String, email: String, password_hash: String) -> Self {
        Self {
            id,
            name,
            email,
            password_hash: SecretString::from(password_hash),
        }
    }

    pub(crate) fn password_hash(&self) -> &SecretString {
        &self.password_hash
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"***")
            .finish()
    }
}

/// Fields required to create a user; `id` is assigned by the store.
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Insert a user, failing with [`StoreError::Conflict`] when the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_password_hash() {
        let user = User::new(
            Uuid::nil(),
            "Ann".to_string(),
            "ann@x.com".to_string(),
            "$argon2id$v=19$secret".to_string(),
        );
        let rendered = format!("{user:?}");
        assert!(rendered.contains("ann@x.com"));
        assert!(!rendered.contains("argon2id"));
    }
}
