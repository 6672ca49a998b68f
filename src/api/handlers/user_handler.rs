//! User directory handlers. Every route here is admin only.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{ValidatedPath, ValidatedPayload, ValidatedQuery};
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::domain::{CreateUser, UserListResponse, UserResponse};
use crate::errors::AppResult;
use crate::types::{Created, NoContent, PaginationParams};

/// New directory record
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// Letters, digits and `@.+-_`, at most 150 characters
    #[validate(length(min = 1, message = "This field may not be blank."))]
    #[schema(example = "user_0")]
    pub username: String,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    #[schema(example = "password_0")]
    pub password: String,
    /// Optional; omitted or blank is stored as an empty string
    #[serde(default)]
    #[schema(example = "email_0@mail.ru")]
    pub email: Option<String>,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            username: req.username,
            password: req.password,
            email: req.email,
        }
    }
}

/// Replacement password
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetPasswordRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    #[schema(example = "new_password_0")]
    pub password: String,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/users/", get(list_users).post(create_user))
        .route("/api/v1/users/:id/", get(get_user).delete(delete_user))
        .route("/api/v1/users/:id/set_password/", post(set_password))
}

/// Create a directory record (admin only)
#[utoipa::path(
    post,
    path = "/api/v1/users/",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body(
        content = CreateUserRequest,
        content_type = "application/json",
        description = "Also accepted as application/x-www-form-urlencoded"
    ),
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Validation error or username taken"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn create_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedPayload(payload): ValidatedPayload<CreateUserRequest>,
) -> AppResult<Created<UserResponse>> {
    require_admin(&current_user)?;
    let user = state.user_service.create_user(payload.into()).await?;
    Ok(Created(UserResponse::from(user)))
}

/// List directory records (admin only)
#[utoipa::path(
    get,
    path = "/api/v1/users/",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses(
        (status = 200, description = "Total count and one page of users", body = UserListResponse),
        (status = 400, description = "Malformed query string"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_users(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<Json<UserListResponse>> {
    require_admin(&current_user)?;
    let (users, count) = state.user_service.list_users(params).await?;
    Ok(Json(UserListResponse::new(users, count)))
}

/// Get user by ID (admin only)
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User record", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> AppResult<Json<UserResponse>> {
    require_admin(&current_user)?;
    let user = state.user_service.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Permanently delete user (admin only)
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}/",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> AppResult<NoContent> {
    require_admin(&current_user)?;
    state.user_service.delete_user(id).await?;
    Ok(NoContent)
}

/// Replace a user's password (admin only)
#[utoipa::path(
    post,
    path = "/api/v1/users/{id}/set_password/",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body(
        content = SetPasswordRequest,
        content_type = "application/json",
        description = "Also accepted as application/x-www-form-urlencoded"
    ),
    responses(
        (status = 204, description = "Password replaced"),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "User not found")
    )
)]
pub async fn set_password(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedPath(id): ValidatedPath<i32>,
    ValidatedPayload(payload): ValidatedPayload<SetPasswordRequest>,
) -> AppResult<NoContent> {
    require_admin(&current_user)?;
    state.user_service.set_password(id, payload.password).await?;
    Ok(NoContent)
}
