//! User repository implementation.
//!
//! Deletes are hard deletes: a removed row is gone, and a second delete of
//! the same id finds nothing.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{NewUser, User, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::types::PaginationParams;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Message reported when a username is already taken.
pub const USERNAME_TAKEN: &str = "username: A user with that username already exists.";

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID, any role
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Find user by exact username, any role
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Insert a new user; a taken username is a validation error
    async fn create(&self, new_user: NewUser) -> AppResult<User>;

    /// Replace the stored password hash
    async fn update_password(&self, id: i32, password_hash: String) -> AppResult<User>;

    /// Permanently delete user by ID
    async fn delete(&self, id: i32) -> AppResult<()>;

    /// One page of users with the given role, ordered by id, plus the total
    async fn list_by_role(
        &self,
        role: UserRole,
        params: &PaginationParams,
    ) -> AppResult<(Vec<User>, u64)>;
}

/// SeaORM-backed implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: NotSet,
            username: Set(new_user.username),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            role: Set(new_user.role.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        // The unique index catches a racing insert that passed the service's pre-check
        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => AppError::validation(USERNAME_TAKEN),
                _ => AppError::from(e),
            })?;

        Ok(User::from(model))
    }

    async fn update_password(&self, id: i32, password_hash: String) -> AppResult<User> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found()?;

        let mut active: ActiveModel = user.into();
        active.password_hash = Set(password_hash);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(AppError::from)?;
        Ok(User::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn list_by_role(
        &self,
        role: UserRole,
        params: &PaginationParams,
    ) -> AppResult<(Vec<User>, u64)> {
        let paginator = UserEntity::find()
            .filter(user::Column::Role.eq(role.as_str()))
            .order_by_asc(user::Column::Id)
            .paginate(&self.db, params.limit());

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(User::from).collect(), total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::Database;

    async fn store() -> UserStore {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        UserStore::new(db.get_connection())
    }

    fn new_user(username: &str, role: UserRole) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: format!("{}@mail.ru", username),
            password_hash: "$argon2id$placeholder".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_ids_are_assigned_and_unique() {
        let store = store().await;
        let first = store.create(new_user("user_0", UserRole::User)).await.unwrap();
        let second = store.create(new_user("user_1", UserRole::User)).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(
            store.find_by_username("user_1").await.unwrap().unwrap().id,
            second.id
        );
    }

    #[tokio::test]
    async fn test_duplicate_username_hits_unique_index() {
        let store = store().await;
        store.create(new_user("user_0", UserRole::User)).await.unwrap();

        let err = store
            .create(new_user("user_0", UserRole::User))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == USERNAME_TAKEN));
    }

    #[tokio::test]
    async fn test_delete_is_not_idempotent() {
        let store = store().await;
        let user = store.create(new_user("user_0", UserRole::User)).await.unwrap();

        store.delete(user.id).await.unwrap();
        assert!(store.find_by_id(user.id).await.unwrap().is_none());
        assert!(matches!(
            store.delete(user.id).await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_list_by_role_counts_only_that_role() {
        let store = store().await;
        store.create(new_user("admin", UserRole::Admin)).await.unwrap();
        for i in 0..5 {
            store
                .create(new_user(&format!("user_{}", i), UserRole::User))
                .await
                .unwrap();
        }

        let params = PaginationParams {
            page: 2,
            page_size: 2,
        };
        let (page, total) = store.list_by_role(UserRole::User, &params).await.unwrap();

        assert_eq!(total, 5);
        let names: Vec<_> = page.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["user_2", "user_3"]);
    }

    #[tokio::test]
    async fn test_update_password_missing_user() {
        let store = store().await;
        assert!(matches!(
            store.update_password(42, "hash".into()).await,
            Err(AppError::NotFound)
        ));
    }
}
