use super::{NewUser, StoreError, User, UserStore};
use async_trait::async_trait;
use std::collections::{HashMap, hash_map::Entry};
use tokio::sync::RwLock;
use uuid::Uuid;

struct StoredUser {
    id: Uuid,
    name: String,
    password_hash: String,
}

/// In-process store keyed by email. Used by tests and `memory://` runs.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, StoredUser>>,
}

impl MemoryUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.get(email).map(|stored| {
            User::new(
                stored.id,
                stored.name.clone(),
                email.to_string(),
                stored.password_hash.clone(),
            )
        }))
    }

    async fn create_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        match users.entry(user.email) {
            Entry::Occupied(_) => Err(StoreError::Conflict),
            Entry::Vacant(slot) => {
                let id = Uuid::new_v4();
                let email = slot.key().clone();
                slot.insert(StoredUser {
                    id,
                    name: user.name.clone(),
                    password_hash: user.password_hash.clone(),
                });
                Ok(User::new(id, user.name, email, user.password_hash))
            }
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
