//! User repository contract.

use async_trait::async_trait;

use common::AppResult;
use domain::User;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Every backend reports a missing id as `AppError::NotFound`. Any other
/// error is backend specific and callers must treat it as an opaque
/// failure.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List every user, in the backend's stable order
    async fn get_users(&self) -> AppResult<Vec<User>>;

    /// Find a user by ID
    async fn get_user(&self, id: i32) -> AppResult<User>;

    /// Store a new user and return the assigned ID (the payload ID is ignored)
    async fn add_user(&self, user: User) -> AppResult<i32>;

    /// Replace the name of the user with `id` (the payload ID is ignored)
    async fn update_user(&self, id: i32, user: User) -> AppResult<User>;

    /// Permanently remove the user with `id`
    async fn delete_user(&self, id: i32) -> AppResult<()>;

    /// Release held resources. Safe to call more than once.
    async fn close(&self);
}
