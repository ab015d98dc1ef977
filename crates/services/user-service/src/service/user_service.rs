//! User service - Handles user-related use cases.
//!
//! Delegates to the injected repository and replaces backend failures with
//! coarse messages that are safe to return to API consumers.

use async_trait::async_trait;
use std::sync::Arc;

use common::{AppError, AppResult};
use domain::User;

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users
    async fn get_users(&self) -> AppResult<Vec<User>>;

    /// Get user by ID
    async fn get_user(&self, id: i32) -> AppResult<User>;

    /// Create a user and return it with its assigned ID
    async fn create_user(&self, user: User) -> AppResult<User>;

    /// Rename the user with `id`
    async fn update_user(&self, id: i32, user: User) -> AppResult<User>;

    /// Delete user permanently
    async fn delete_user(&self, id: i32) -> AppResult<()>;

    /// Release repository resources at shutdown
    async fn close(&self);
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

/// Keep not-found visible to the caller; log anything else and replace it.
fn translate(action: &'static str) -> impl FnOnce(AppError) -> AppError {
    move |err| match err {
        AppError::NotFound => AppError::NotFound,
        other => {
            tracing::error!(error = ?other, "could not {}", action);
            AppError::service(format!("could not {}", action))
        }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_users(&self) -> AppResult<Vec<User>> {
        self.repo.get_users().await.map_err(translate("fetch users"))
    }

    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.repo.get_user(id).await.map_err(translate("fetch user"))
    }

    async fn create_user(&self, user: User) -> AppResult<User> {
        let name = user.name.clone();
        let id = self
            .repo
            .add_user(user)
            .await
            .map_err(translate("create user"))?;

        tracing::info!(id, "user created");
        Ok(User::new(id, name))
    }

    async fn update_user(&self, id: i32, user: User) -> AppResult<User> {
        self.repo
            .update_user(id, user)
            .await
            .map_err(translate("update user"))
    }

    async fn delete_user(&self, id: i32) -> AppResult<()> {
        self.repo
            .delete_user(id)
            .await
            .map_err(translate("delete user"))?;

        tracing::info!(id, "user deleted");
        Ok(())
    }

    async fn close(&self) {
        self.repo.close().await;
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::repository::MockUserRepository;

    fn service(repo: MockUserRepository) -> UserManager {
        UserManager::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn get_users_returns_repository_result_unaltered() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_users()
            .times(1)
            .returning(|| Ok(vec![User::new(1, "Alice"), User::new(2, "Bob")]));

        let users = service(repo).get_users().await.unwrap();
        assert_eq!(users, vec![User::new(1, "Alice"), User::new(2, "Bob")]);
    }

    #[tokio::test]
    async fn get_user_passes_id_through() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_user()
            .with(eq(7))
            .returning(|id| Ok(User::new(id, "Grace")));

        let user = service(repo).get_user(7).await.unwrap();
        assert_eq!(user, User::new(7, "Grace"));
    }

    #[tokio::test]
    async fn not_found_is_not_rewrapped() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_user().returning(|_| Err(AppError::NotFound));

        let err = service(repo).get_user(999).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn backend_failures_become_service_errors() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_users()
            .returning(|| Err(AppError::internal("pq: password authentication failed")));

        let err = service(repo).get_users().await.unwrap_err();
        match err {
            AppError::Service(msg) => assert_eq!(msg, "could not fetch users"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn create_user_returns_assigned_id_and_submitted_name() {
        let mut repo = MockUserRepository::new();
        repo.expect_add_user()
            .withf(|user| user.name == "Ted")
            .returning(|_| Ok(4));

        let user = service(repo).create_user(User::new(123, "Ted")).await.unwrap();
        assert_eq!(user, User::new(4, "Ted"));
    }

    #[tokio::test]
    async fn create_failure_hides_backend_text() {
        let mut repo = MockUserRepository::new();
        repo.expect_add_user()
            .returning(|_| Err(AppError::internal("duplicate key value violates constraint")));

        let err = service(repo).create_user(User::unsaved("Ted")).await.unwrap_err();
        assert_eq!(err.user_message(), "could not create user");
    }

    #[tokio::test]
    async fn update_user_forwards_path_id() {
        let mut repo = MockUserRepository::new();
        repo.expect_update_user()
            .withf(|id, user| *id == 2 && user.name == "Robert")
            .returning(|id, user| Ok(User::new(id, user.name)));

        let user = service(repo)
            .update_user(2, User::new(50, "Robert"))
            .await
            .unwrap();
        assert_eq!(user, User::new(2, "Robert"));
    }

    #[tokio::test]
    async fn update_failure_is_translated() {
        let mut repo = MockUserRepository::new();
        repo.expect_update_user()
            .returning(|_, _| Err(AppError::internal("connection refused")));

        let err = service(repo)
            .update_user(1, User::unsaved("X"))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "could not update user");
    }

    #[tokio::test]
    async fn delete_user_delegates() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete_user().with(eq(3)).times(1).returning(|_| Ok(()));

        assert!(service(repo).delete_user(3).await.is_ok());
    }

    #[tokio::test]
    async fn delete_failure_is_translated() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete_user()
            .returning(|_| Err(AppError::internal("deadlock detected")));

        let err = service(repo).delete_user(3).await.unwrap_err();
        assert_eq!(err.user_message(), "could not delete user");
    }

    #[tokio::test]
    async fn close_reaches_repository() {
        let mut repo = MockUserRepository::new();
        repo.expect_close().times(1).returning(|| ());

        service(repo).close().await;
    }

    #[tokio::test]
    #[should_panic(expected = "get_users")]
    async fn unassigned_mock_method_fails_loudly() {
        let repo = MockUserRepository::new();
        let _ = service(repo).get_users().await;
    }
}
