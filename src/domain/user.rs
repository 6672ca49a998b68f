//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidateEmail;

use crate::config::{
    MAX_EMAIL_LENGTH, MAX_USERNAME_LENGTH, ROLE_ADMIN, ROLE_USER, USERNAME_EXTRA_CHARS,
};
use crate::errors::{AppError, AppResult};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => ROLE_ADMIN,
            UserRole::User => ROLE_USER,
        }
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Directory operations (list, retrieve, delete, set password) only
    /// ever see regular users; privileged accounts live outside it.
    pub fn is_directory_member(&self) -> bool {
        self.role == UserRole::User
    }
}

/// Input for creating a user, before validation and hashing.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUser {
    #[schema(example = "user_0")]
    pub username: String,
    #[schema(example = "password_0")]
    pub password: String,
    #[schema(example = "email_0@mail.ru")]
    pub email: Option<String>,
}

/// Validated record ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Identifier assigned by the directory
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "user_0")]
    pub username: String,
    #[schema(example = "email_0@mail.ru")]
    pub email: String,
    #[schema(example = "user")]
    pub role: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role.to_string(),
            created_at: user.created_at,
        }
    }
}

/// Directory listing: total record count plus the requested page.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserListResponse {
    /// Number of records in the directory, regardless of paging
    #[schema(example = 20)]
    pub count: u64,
    pub items: Vec<UserResponse>,
}

impl UserListResponse {
    pub fn new(users: Vec<User>, count: u64) -> Self {
        Self {
            count,
            items: users.into_iter().map(UserResponse::from).collect(),
        }
    }
}

/// Check a username: non-blank, bounded, letters/digits and `@.+-_` only.
pub fn validate_username(username: &str) -> AppResult<()> {
    if username.trim().is_empty() {
        return Err(AppError::validation("username: This field may not be blank."));
    }
    if username.chars().count() as u64 > MAX_USERNAME_LENGTH {
        return Err(AppError::validation(format!(
            "username: Ensure this field has no more than {} characters.",
            MAX_USERNAME_LENGTH
        )));
    }
    let allowed = |c: char| c.is_alphanumeric() || USERNAME_EXTRA_CHARS.contains(c);
    if !username.chars().all(allowed) {
        return Err(AppError::validation(
            "username: Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
        ));
    }
    Ok(())
}

/// Email is optional; absent or blank becomes an empty string, anything
/// else must look like an address.
pub fn normalize_email(email: Option<String>) -> AppResult<String> {
    let email = email.map(|e| e.trim().to_string()).unwrap_or_default();
    if email.is_empty() {
        return Ok(email);
    }
    if email.len() as u64 > MAX_EMAIL_LENGTH || !email.validate_email() {
        return Err(AppError::validation("email: Enter a valid email address."));
    }
    Ok(email)
}
