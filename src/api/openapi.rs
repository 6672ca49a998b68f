//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{auth_handler, user_handler};
use crate::domain::{UserListResponse, UserResponse, UserRole};
use crate::services::LoginResponse;

/// OpenAPI documentation for the user directory
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Directory",
        version = "0.1.0",
        description = "User directory with password login, managed by an admin account",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::login,
        auth_handler::me,
        // User endpoints
        user_handler::create_user,
        user_handler::list_users,
        user_handler::get_user,
        user_handler::delete_user,
        user_handler::set_password,
    ),
    components(
        schemas(
            UserRole,
            UserResponse,
            UserListResponse,
            auth_handler::LoginRequest,
            LoginResponse,
            user_handler::CreateUserRequest,
            user_handler::SetPasswordRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Password login"),
        (name = "Users", description = "Directory management (admin only)")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /api/auth/login/"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/auth/login/",
            "/api/auth/me/",
            "/api/v1/users/",
            "/api/v1/users/{id}/",
            "/api/v1/users/{id}/set_password/",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_body_endpoints_document_form_encoding() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        for path in ["/api/v1/users/", "/api/v1/users/{id}/set_password/"] {
            let body = &doc["paths"][path]["post"]["requestBody"];
            assert!(body["content"]["application/json"].is_object(), "{}", path);
            assert_eq!(
                body["description"],
                "Also accepted as application/x-www-form-urlencoded",
                "{}",
                path
            );
        }
    }
}
