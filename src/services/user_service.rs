//! User directory service - create, list, retrieve, delete, set password.
//!
//! The directory is the set of `user`-role records. Admin accounts share
//! the table but are invisible here: they are not counted, listed,
//! retrieved or deleted through these operations.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{normalize_email, validate_username, CreateUser, NewUser, Password, User, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::repositories::USERNAME_TAKEN;
use crate::infra::UserRepository;
use crate::types::PaginationParams;

/// User directory trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a directory record
    async fn create_user(&self, input: CreateUser) -> AppResult<User>;

    /// Create a privileged account (CLI provisioning only)
    async fn create_admin(&self, input: CreateUser) -> AppResult<User>;

    /// One page of directory records plus the total count
    async fn list_users(&self, params: PaginationParams) -> AppResult<(Vec<User>, u64)>;

    /// Get directory record by ID
    async fn get_user(&self, id: i32) -> AppResult<User>;

    /// Permanently delete a directory record
    async fn delete_user(&self, id: i32) -> AppResult<()>;

    /// Replace the password of a directory record
    async fn set_password(&self, id: i32, password: String) -> AppResult<()>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    async fn register(&self, input: CreateUser, role: UserRole) -> AppResult<User> {
        validate_username(&input.username)?;
        let email = normalize_email(input.email)?;

        if self.repo.find_by_username(&input.username).await?.is_some() {
            return Err(AppError::validation(USERNAME_TAKEN));
        }

        let password_hash = Password::new(&input.password)?.into_string();
        let user = self
            .repo
            .create(NewUser {
                username: input.username,
                email,
                password_hash,
                role,
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, role = %user.role, "User created");
        Ok(user)
    }

    /// Admin rows answer NotFound, exactly like ids that never existed.
    async fn find_member(&self, id: i32) -> AppResult<User> {
        self.repo
            .find_by_id(id)
            .await?
            .filter(User::is_directory_member)
            .ok_or_not_found()
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, input: CreateUser) -> AppResult<User> {
        self.register(input, UserRole::User).await
    }

    async fn create_admin(&self, input: CreateUser) -> AppResult<User> {
        self.register(input, UserRole::Admin).await
    }

    async fn list_users(&self, params: PaginationParams) -> AppResult<(Vec<User>, u64)> {
        self.repo.list_by_role(UserRole::User, &params).await
    }

    async fn get_user(&self, id: i32) -> AppResult<User> {
        self.find_member(id).await
    }

    async fn delete_user(&self, id: i32) -> AppResult<()> {
        let user = self.find_member(id).await?;
        self.repo.delete(user.id).await?;

        tracing::info!(user_id = id, username = %user.username, "User deleted");
        Ok(())
    }

    async fn set_password(&self, id: i32, password: String) -> AppResult<()> {
        let user = self.find_member(id).await?;
        let password_hash = Password::new(&password)?.into_string();
        self.repo.update_password(user.id, password_hash).await?;

        tracing::info!(user_id = id, "Password changed");
        Ok(())
    }
}
