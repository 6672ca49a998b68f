//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use clap::{Parser, Subcommand};

/// User Directory - user records and password login over HTTP
#[derive(Parser, Debug)]
#[command(name = "user-directory")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Manage accounts outside the HTTP API
    Users(UsersArgs),
}

/// Arguments for the serve command. Unset values fall back to the
/// environment configuration.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the users command
#[derive(Parser, Debug)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub action: UsersAction,
}

/// Account actions
#[derive(Subcommand, Debug)]
pub enum UsersAction {
    /// Provision an admin account, the only kind allowed to call /api/v1/users/
    CreateAdmin {
        #[arg(long)]
        username: String,

        #[arg(long, env = "ADMIN_PASSWORD")]
        password: String,

        #[arg(long)]
        email: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_admin_parses() {
        let cli = Cli::try_parse_from([
            "user-directory",
            "users",
            "create-admin",
            "--username",
            "admin",
            "--password",
            "admin_password",
        ])
        .unwrap();

        match cli.command {
            Commands::Users(UsersArgs {
                action: UsersAction::CreateAdmin { username, email, .. },
            }) => {
                assert_eq!(username, "admin");
                assert!(email.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_serve_overrides_are_optional() {
        let cli = Cli::try_parse_from(["user-directory", "serve", "-p", "8080"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, Some(8080));
                assert!(args.host.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["user-directory", "migrate", "status", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Migrate(MigrateArgs {
                action: MigrateAction::Status
            })
        ));
    }
}
