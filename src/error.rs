use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::error;

/// One field-level validation failure, in the wire shape clients expect:
/// `{"msg": "...", "param": "..."}`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub msg: &'static str,
    pub param: &'static str,
}

/// Every failure the API can return. Each variant is serialized exactly once,
/// in `IntoResponse` below, so handlers never build ad hoc error bodies.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("user already exists")]
    UserExists,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("no token")]
    NoToken,
    #[error("invalid token")]
    InvalidToken,
    #[error("not authorized")]
    NotAuthorized,
    #[error("bad request: {0}")]
    BadRequest(&'static str),
    #[error("not found: {0}")]
    NotFound(&'static str),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, json!({ "errors": errors }))
            }
            ApiError::UserExists => (
                StatusCode::BAD_REQUEST,
                json!({ "errors": [{ "msg": "User already exists" }] }),
            ),
            // Unknown email and wrong password must produce byte-identical
            // responses, so both map to this single variant.
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                json!({ "errors": [{ "msg": "Invalid credentials" }] }),
            ),
            ApiError::NoToken => (
                StatusCode::UNAUTHORIZED,
                json!({ "msg": "No token, authorization denied" }),
            ),
            ApiError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                json!({ "msg": "Token is not valid" }),
            ),
            ApiError::NotAuthorized => (
                StatusCode::UNAUTHORIZED,
                json!({ "msg": "User not authorized" }),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "msg": msg })),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "msg": msg })),
            ApiError::Internal(e) => {
                // Detail stays in the server log, never in the response.
                error!(error = %e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "msg": "Server error" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn no_token_shape() {
        let (status, body) = body_of(ApiError::NoToken).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "msg": "No token, authorization denied" }));
    }

    #[tokio::test]
    async fn invalid_token_shape() {
        let (status, body) = body_of(ApiError::InvalidToken).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "msg": "Token is not valid" }));
    }

    #[tokio::test]
    async fn user_exists_matches_validation_shape() {
        let (status, body) = body_of(ApiError::UserExists).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "errors": [{ "msg": "User already exists" }] }));
    }

    #[tokio::test]
    async fn invalid_credentials_is_uniform() {
        // Both login failure paths funnel into the same variant, so the two
        // responses are byte-identical by construction.
        let resp_a = ApiError::InvalidCredentials.into_response();
        let resp_b = ApiError::InvalidCredentials.into_response();
        assert_eq!(resp_a.status(), resp_b.status());
        let a = to_bytes(resp_a.into_body(), usize::MAX).await.unwrap();
        let b = to_bytes(resp_b.into_body(), usize::MAX).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn validation_lists_every_field() {
        let errors = vec![
            FieldError { msg: "Name is required", param: "name" },
            FieldError { msg: "Please include a valid email", param: "email" },
        ];
        let (status, body) = body_of(ApiError::Validation(errors)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);
        assert_eq!(body["errors"][0]["param"], "name");
    }

    #[tokio::test]
    async fn internal_never_echoes_detail() {
        let (status, body) =
            body_of(ApiError::Internal(anyhow::anyhow!("secret detail"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "msg": "Server error" }));
    }
}
