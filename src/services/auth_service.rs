//! Authentication service - Handles user authentication and authorization.
//!
//! Password hashing lives in the domain `Password` value object; this
//! service only decides Authenticated vs Rejected and mints tokens.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub username: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Returned after a successful login: the identity plus a bearer token
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "user_0")]
    pub username: String,
    #[schema(example = "email_0@mail.ru")]
    pub email: String,
    #[schema(example = "user")]
    pub role: String,
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check a username/password pair and issue a token on success
    async fn login(&self, username: String, password: String) -> AppResult<LoginResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Load the account a token was issued for
    async fn identity(&self, user_id: i32) -> AppResult<User>;
}

fn generate_token(user: &User, config: &Config) -> AppResult<LoginResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        username: user.username.clone(),
        role: user.role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(LoginResponse {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        role: user.role.to_string(),
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    repo: Arc<dyn UserRepository>,
    config: Config,
}

impl Authenticator {
    pub fn new(repo: Arc<dyn UserRepository>, config: Config) -> Self {
        Self { repo, config }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn login(&self, username: String, password: String) -> AppResult<LoginResponse> {
        let user = self.repo.find_by_username(&username).await?;

        // Unknown usernames still pay for a full Argon2 verification
        let authenticated = match &user {
            Some(user) => Password::from_hash(user.password_hash.clone()).verify(&password),
            None => {
                Password::decoy().verify(&password);
                false
            }
        };

        match user {
            Some(user) if authenticated => {
                tracing::info!(user_id = user.id, username = %user.username, "Login succeeded");
                generate_token(&user, &self.config)
            }
            _ => {
                tracing::warn!(username = %username, "Login rejected");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    async fn identity(&self, user_id: i32) -> AppResult<User> {
        // A token that outlived its account is no longer a valid credential
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::Unauthorized)
    }
}
