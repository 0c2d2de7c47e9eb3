//! # Authenticated User Extraction
//!
//! Token issuance and validation live with an upstream auth collaborator;
//! by the time a request reaches this service, the authenticated user id
//! is carried in the `x-user-id` header. This extractor reads it and
//! rejects requests that arrive without one.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated user making the request
#[derive(Debug, Clone)]
pub struct AuthUser(pub String);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty());

        match user_id {
            Some(id) => Ok(AuthUser(id.to_string())),
            None => Err((
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({
                    "success": false,
                    "message": "Authentication required"
                })),
            )
                .into_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    #[tokio::test]
    async fn test_extracts_user_id() {
        let request = Request::builder()
            .header("x-user-id", "user_42")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let user = AuthUser::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(user.0, "user_42");
    }

    #[tokio::test]
    async fn test_rejects_missing_header() {
        let request = Request::builder().body(()).unwrap();
        let (mut parts, _) = request.into_parts();

        let rejection = AuthUser::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(rejection.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_rejects_empty_header() {
        let request = Request::builder()
            .header("x-user-id", "")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();

        let rejection = AuthUser::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(rejection.status(), StatusCode::UNAUTHORIZED);
    }
}
