//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations
//! - `users create-admin` - Provision the privileged account

pub mod args;

pub use args::{Cli, Commands};
