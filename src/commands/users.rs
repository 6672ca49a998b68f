//! Users command - Account provisioning from the command line.

use std::sync::Arc;

use crate::cli::args::{UsersAction, UsersArgs};
use crate::config::Config;
use crate::domain::CreateUser;
use crate::errors::AppResult;
use crate::infra::{Database, UserStore};
use crate::services::{UserManager, UserService};

/// Execute the users command
pub async fn execute(args: UsersArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config.database_url).await?;
    let service = UserManager::new(Arc::new(UserStore::new(db.get_connection())));

    match args.action {
        UsersAction::CreateAdmin {
            username,
            password,
            email,
        } => {
            let admin = service
                .create_admin(CreateUser {
                    username,
                    password,
                    email,
                })
                .await?;
            println!("Created admin '{}' (id {})", admin.username, admin.id);
        }
    }

    Ok(())
}
