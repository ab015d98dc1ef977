//! In-memory user repository.

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::{AppError, AppResult, OptionExt};
use domain::User;

use super::UserRepository;

/// Users and the id counter, always locked together.
#[derive(Debug)]
struct Store {
    users: Vec<User>,
    /// `None` once `i32::MAX` has been handed out
    next_id: Option<i32>,
}

impl Store {
    fn position(&self, id: i32) -> Option<usize> {
        self.users.iter().position(|user| user.id == id)
    }
}

/// Process-local repository backed by a vector.
///
/// State belongs to the instance, so every test can build its own store.
/// Iteration follows insertion order.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    store: RwLock<Store>,
}

impl InMemoryUserRepository {
    /// Create a store seeded with the sample users Alice, Bob and Terry.
    pub fn new() -> Self {
        Self::with_users(vec![
            User::new(1, "Alice"),
            User::new(2, "Bob"),
            User::new(3, "Terry"),
        ])
    }

    /// Create a store with no users.
    pub fn empty() -> Self {
        Self::with_users(Vec::new())
    }

    /// Create a store holding `users`; new ids start above the largest one,
    /// and never below 1.
    pub fn with_users(users: Vec<User>) -> Self {
        let next_id = users
            .iter()
            .map(|u| u.id)
            .max()
            .unwrap_or(0)
            .max(0)
            .checked_add(1);
        Self {
            store: RwLock::new(Store { users, next_id }),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_users(&self) -> AppResult<Vec<User>> {
        Ok(self.store.read().await.users.clone())
    }

    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.store
            .read()
            .await
            .users
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or_not_found()
    }

    async fn add_user(&self, user: User) -> AppResult<i32> {
        let mut store = self.store.write().await;
        let id = store
            .next_id
            .ok_or_else(|| AppError::internal("in-memory user ids exhausted"))?;
        store.next_id = id.checked_add(1);
        store.users.push(user.with_id(id));
        tracing::debug!(id, "user added to in-memory store");
        Ok(id)
    }

    async fn update_user(&self, id: i32, user: User) -> AppResult<User> {
        let mut store = self.store.write().await;
        let index = store.position(id).ok_or_not_found()?;

        // Mutate the stored element, not a copy of it
        let stored = &mut store.users[index];
        stored.rename(user.name);
        Ok(stored.clone())
    }

    async fn delete_user(&self, id: i32) -> AppResult<()> {
        let mut store = self.store.write().await;
        let index = store.position(id).ok_or_not_found()?;
        store.users.remove(index);
        tracing::debug!(id, "user removed from in-memory store");
        Ok(())
    }

    async fn close(&self) {}
}
