use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use inkwell_core::domain::{ProfileChanges, User};
use inkwell_core::error::RepoError;
use inkwell_core::ports::UserRepository;

/// In-memory user store keyed by id. Emails are unique.
pub struct InMemoryUserRepository {
    store: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn email_taken(store: &HashMap<Uuid, User>, email: &str, except: Uuid) -> bool {
    store.values().any(|u| u.id != except && u.email == email)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        let store = self.store.read().await;
        Ok(ids.iter().filter_map(|id| store.get(id).cloned()).collect())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        // One write lock covers the uniqueness check and the insert.
        let mut store = self.store.write().await;
        if email_taken(&store, &user.email, user.id) || store.contains_key(&user.id) {
            return Err(RepoError::Constraint("User already exists".to_string()));
        }
        store.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        changes: ProfileChanges,
        at: DateTime<Utc>,
    ) -> Result<Option<User>, RepoError> {
        let mut store = self.store.write().await;
        if let Some(email) = changes.email.as_set() {
            if email_taken(&store, email, id) {
                return Err(RepoError::Constraint("User already exists".to_string()));
            }
        }
        Ok(store.get_mut(&id).map(|user| {
            changes.apply_to(user, at);
            user.clone()
        }))
    }

    async fn record_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<Option<User>, RepoError> {
        let mut store = self.store.write().await;
        Ok(store.get_mut(&id).map(|user| {
            user.last_login = Some(at);
            user.clone()
        }))
    }
}
