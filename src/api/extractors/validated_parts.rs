//! Path and query extractors whose rejections go through `AppError`.
//!
//! axum's own `Path` and `Query` answer with a plain-text 400. A record id
//! that cannot be parsed names no record, so it is a 404; a malformed query
//! string is a validation error with the usual JSON body.

use axum::{
    async_trait,
    extract::{
        rejection::{PathRejection, QueryRejection},
        FromRequestParts, Path, Query,
    },
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// Path parameters. Any rejection (non-numeric or out-of-range id) is 404.
pub struct ValidatedPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::debug!("Path rejected for {}: {}", parts.uri.path(), e.body_text());
                AppError::NotFound
            })?;
        Ok(ValidatedPath(value))
    }
}

/// Query string parameters. Rejections become 400 validation errors.
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;
        Ok(ValidatedQuery(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        routing::get,
        Router,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    use crate::errors::AppResult;

    #[derive(Deserialize)]
    struct Page {
        page: Option<u64>,
    }

    async fn by_id(ValidatedPath(id): ValidatedPath<i32>) -> String {
        id.to_string()
    }

    async fn paged(ValidatedQuery(q): ValidatedQuery<Page>) -> AppResult<String> {
        Ok(q.page.unwrap_or(1).to_string())
    }

    fn router() -> Router {
        Router::new()
            .route("/items/:id/", get(by_id))
            .route("/items/", get(paged))
    }

    async fn call(uri: &str) -> (StatusCode, String) {
        let response = router()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_numeric_id_passes_through() {
        assert_eq!(call("/items/42/").await, (StatusCode::OK, "42".to_string()));
    }

    #[tokio::test]
    async fn test_unparseable_id_is_not_found() {
        for uri in ["/items/abc/", "/items/99999999999/", "/items/-/"] {
            let (status, body) = call(uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
            let json: serde_json::Value = serde_json::from_str(&body).unwrap();
            assert_eq!(json["error"]["code"], "NOT_FOUND");
        }
    }

    #[tokio::test]
    async fn test_bad_query_is_validation_error() {
        let (status, body) = call("/items/?page=x").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");

        assert_eq!(call("/items/?page=3").await, (StatusCode::OK, "3".to_string()));
    }
}
