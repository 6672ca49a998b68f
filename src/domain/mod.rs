//! Domain layer - Core business entities and logic
//!
//! This module contains the user record, the password value object and
//! the input rules every directory record has to satisfy. Nothing here
//! knows about HTTP or the database.

pub mod password;
pub mod user;

pub use password::Password;
pub use user::{
    normalize_email, validate_username, CreateUser, NewUser, User, UserListResponse,
    UserResponse, UserRole,
};
