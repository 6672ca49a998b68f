//! Authentication handlers.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedPayload;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::services::LoginResponse;

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    #[schema(example = "user_0")]
    pub username: String,
    /// Any mismatch, including an empty password, is a rejected login
    #[schema(example = "password_0")]
    pub password: String,
}

/// Public authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/api/auth/login/", post(login))
}

/// Authentication routes that need a bearer token
pub fn session_routes() -> Router<AppState> {
    Router::new().route("/api/auth/me/", get(me))
}

/// Login and get JWT token
#[utoipa::path(
    post,
    path = "/api/auth/login/",
    tag = "Authentication",
    request_body(
        content = LoginRequest,
        content_type = "application/json",
        description = "Also accepted as application/x-www-form-urlencoded"
    ),
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedPayload(payload): ValidatedPayload<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let response = state
        .auth_service
        .login(payload.username, payload.password)
        .await?;

    Ok(Json(response))
}

/// Identity behind the presented token
#[utoipa::path(
    get,
    path = "/api/auth/me/",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current account", body = UserResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn me(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<UserResponse>> {
    let user = state.auth_service.identity(current_user.id).await?;
    Ok(Json(UserResponse::from(user)))
}
