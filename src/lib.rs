//! User Directory - user records and password login over HTTP.
//!
//! The crate is split into the same layers as any Axum service here:
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: User entity, password value object, input rules
//! - **services**: Directory and authenticator use cases
//! - **infra**: Database connection, migrations, repositories
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared request/response helpers
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Provision the privileged account
//! cargo run -- users create-admin --username admin --password 'change-me-now'
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::{create_router, AppState};
pub use config::Config;
pub use domain::{Password, User, UserRole};
pub use errors::{AppError, AppResult};
pub use infra::Database;
