//! Validated body extractor - Combines deserialization with validation.
//!
//! Bodies may arrive as JSON or as an HTML form
//! (`application/x-www-form-urlencoded`); both end up in the same struct.

use axum::{
    async_trait,
    extract::{
        rejection::{FormRejection, JsonRejection},
        FromRequest, Request,
    },
    http::{header::CONTENT_TYPE, HeaderMap},
    Form, Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::AppError;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Validated body extractor that automatically validates requests.
///
/// # Example
///
/// ```rust,ignore
/// use serde::Deserialize;
/// use validator::Validate;
/// use user_directory::api::extractors::ValidatedPayload;
///
/// #[derive(Deserialize, Validate)]
/// struct SetPasswordRequest {
///     #[validate(length(min = 1))]
///     password: String,
/// }
///
/// async fn set_password(ValidatedPayload(payload): ValidatedPayload<SetPasswordRequest>) {
///     // payload is already validated
/// }
/// ```
pub struct ValidatedPayload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedPayload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    Form<T>: FromRequest<S, Rejection = FormRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = if is_form(req.headers()) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::validation(e.body_text()))?;
            value
        } else {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::validation(e.body_text()))?;
            value
        };

        value
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(ValidatedPayload(value))
    }
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with(FORM_CONTENT_TYPE))
}

/// Format validation errors into a user-friendly string
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(m) => format!("{}: {}", field, m),
                None => format!("{}: This field is invalid.", field),
            })
        })
        .collect::<Vec<_>>();
    // field_errors() is a HashMap; keep the output stable
    messages.sort();
    messages.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request as HttpRequest};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Payload {
        #[validate(length(min = 1, message = "This field may not be blank."))]
        username: String,
        email: Option<String>,
    }

    async fn extract(content_type: &str, body: &'static str) -> Result<Payload, AppError> {
        let req = HttpRequest::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body))
            .unwrap();
        ValidatedPayload::<Payload>::from_request(req, &())
            .await
            .map(|ValidatedPayload(p)| p)
    }

    #[tokio::test]
    async fn test_json_body() {
        let payload = extract("application/json", r#"{"username":"user_0"}"#)
            .await
            .unwrap();
        assert_eq!(payload.username, "user_0");
        assert!(payload.email.is_none());
    }

    #[tokio::test]
    async fn test_form_body() {
        let payload = extract(
            "application/x-www-form-urlencoded; charset=utf-8",
            "username=user_0&email=email_0%40mail.ru",
        )
        .await
        .unwrap();
        assert_eq!(payload.username, "user_0");
        assert_eq!(payload.email.as_deref(), Some("email_0@mail.ru"));
    }

    #[tokio::test]
    async fn test_validation_failure_names_the_field() {
        let err = extract("application/json", r#"{"username":""}"#)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "username: This field may not be blank."));
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_validation_error() {
        let err = extract("application/json", "{not json").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
