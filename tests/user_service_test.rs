//! Service tests against the SeaORM store on in-memory SQLite.

use std::sync::Arc;

use user_directory::domain::CreateUser;
use user_directory::errors::AppError;
use user_directory::infra::{Database, UserRepository, UserStore};
use user_directory::services::{AuthService, Authenticator, UserManager, UserService};
use user_directory::types::PaginationParams;
use user_directory::Config;

struct Services {
    users: UserManager,
    auth: Authenticator,
}

async fn services() -> Services {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let repo: Arc<dyn UserRepository> = Arc::new(UserStore::new(db.get_connection()));
    let config = Config::new("sqlite::memory:", "test-secret-key-for-testing-only-32chars").unwrap();

    Services {
        users: UserManager::new(repo.clone()),
        auth: Authenticator::new(repo, config),
    }
}

fn input(i: usize) -> CreateUser {
    CreateUser {
        username: format!("user_{}", i),
        password: format!("password_{}", i),
        email: Some(format!("email_{}@mail.ru", i)),
    }
}

#[tokio::test]
async fn test_created_user_authenticates_only_with_its_password() {
    let s = services().await;
    s.users.create_user(input(0)).await.unwrap();

    let ok = s.auth.login("user_0".into(), "password_0".into()).await.unwrap();
    assert_eq!(ok.username, "user_0");

    for wrong in ["password_1", "PASSWORD_0", "password_0 ", ""] {
        assert!(matches!(
            s.auth.login("user_0".into(), wrong.into()).await,
            Err(AppError::InvalidCredentials)
        ));
    }
}

#[tokio::test]
async fn test_count_is_exact_and_excludes_admins() {
    let s = services().await;
    s.users
        .create_admin(CreateUser {
            username: "admin".into(),
            password: "admin_password".into(),
            email: None,
        })
        .await
        .unwrap();

    let mut ids = Vec::new();
    for i in 0..20 {
        ids.push(s.users.create_user(input(i)).await.unwrap().id);
    }

    let (_, count) = s.users.list_users(PaginationParams::default()).await.unwrap();
    assert_eq!(count, 20);

    for id in &ids[..5] {
        s.users.delete_user(*id).await.unwrap();
    }
    let (users, count) = s.users.list_users(PaginationParams::default()).await.unwrap();
    assert_eq!(count, 15);
    assert!(users.iter().all(|u| u.is_directory_member()));
}

#[tokio::test]
async fn test_delete_twice() {
    let s = services().await;
    let user = s.users.create_user(input(0)).await.unwrap();

    s.users.delete_user(user.id).await.unwrap();
    assert!(matches!(s.users.delete_user(user.id).await, Err(AppError::NotFound)));
    assert!(matches!(
        s.auth.login("user_0".into(), "password_0".into()).await,
        Err(AppError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn test_set_password() {
    let s = services().await;
    let user = s.users.create_user(input(0)).await.unwrap();

    s.users
        .set_password(user.id, "replacement_0".into())
        .await
        .unwrap();

    assert!(s.auth.login("user_0".into(), "password_0".into()).await.is_err());
    assert!(s.auth.login("user_0".into(), "replacement_0".into()).await.is_ok());
}
