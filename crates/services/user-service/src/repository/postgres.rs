//! PostgreSQL user repository.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, DbErr, EntityTrait, Set};

use common::{AppError, AppResult, OptionExt};
use domain::User;

use super::entities::user::{ActiveModel, Entity as UserEntity};
use super::UserRepository;
use crate::infra::Database;

/// Relational implementation of UserRepository.
///
/// Statements are built with the SeaORM query builder, so ids and names
/// always travel as bound parameters.
pub struct PostgresUserRepository {
    db: Database,
}

impl PostgresUserRepository {
    /// Create new repository instance. The schema must already exist.
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get_users(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .all(self.db.connection())
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn get_user(&self, id: i32) -> AppResult<User> {
        UserEntity::find_by_id(id)
            .one(self.db.connection())
            .await?
            .map(User::from)
            .ok_or_not_found()
    }

    async fn add_user(&self, user: User) -> AppResult<i32> {
        let active_model = ActiveModel {
            id: NotSet,
            name: Set(user.name),
        };

        let model = active_model
            .insert(self.db.connection())
            .await
            .map_err(AppError::from)?;
        Ok(model.id)
    }

    async fn update_user(&self, id: i32, user: User) -> AppResult<User> {
        let existing = UserEntity::find_by_id(id)
            .one(self.db.connection())
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(user.name);

        // The row can vanish between the lookup and the update
        let model = active
            .update(self.db.connection())
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => AppError::NotFound,
                other => AppError::from(other),
            })?;
        Ok(User::from(model))
    }

    async fn delete_user(&self, id: i32) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(self.db.connection())
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn close(&self) {
        self.db.close().await;
    }
}
