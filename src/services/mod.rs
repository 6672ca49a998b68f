//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and the repository. Handlers only
//! ever see the traits, so tests can swap either side.

mod auth_service;
mod user_service;

pub use auth_service::{AuthService, Authenticator, Claims, LoginResponse};
pub use user_service::{UserManager, UserService};
