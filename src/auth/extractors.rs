use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;
use uuid::Uuid;

use crate::auth::jwt::JwtKeys;
use crate::error::ApiError;

/// Header carrying the raw signed token. Kept as-is (no Bearer framing) for
/// wire compatibility with existing clients.
pub const AUTH_HEADER: &str = "x-auth-token";

/// Extracts and verifies the token, yielding the caller's user ID.
/// A missing header and a failed verification are distinct rejections;
/// every verification failure cause maps to the same "Token is not valid".
#[derive(Debug)]
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        // Absent header and unreadable/invalid token are distinct failures;
        // a header that is present but not valid UTF-8 is an invalid token.
        let header = parts.headers.get(AUTH_HEADER).ok_or(ApiError::NoToken)?;
        let token = header.to_str().map_err(|_| {
            warn!("unreadable token header");
            ApiError::InvalidToken
        })?;

        let claims = keys.verify(token).map_err(|_| {
            warn!("invalid or expired token");
            ApiError::InvalidToken
        })?;

        Ok(AuthUser(claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use axum::http::Request;

    fn parts_with_header(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/auth");
        if let Some(v) = value {
            builder = builder.header(AUTH_HEADER, v);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn missing_header_is_no_token() {
        let state = AppState::fake("dev-secret", 300);
        let mut parts = parts_with_header(None);
        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NoToken));
    }

    #[tokio::test]
    async fn unreadable_header_is_invalid_token() {
        let state = AppState::fake("dev-secret", 300);
        let mut parts = parts_with_header(None);
        // Valid header bytes (obs-text) that are not valid UTF-8.
        parts.headers.insert(
            AUTH_HEADER,
            axum::http::HeaderValue::from_bytes(&[0xfe, 0xff]).unwrap(),
        );
        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidToken));
    }

    #[tokio::test]
    async fn tampered_token_is_invalid_token() {
        let state = AppState::fake("dev-secret", 300);
        let mut parts = parts_with_header(Some("deadbeef.not.real"));
        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidToken));
    }

    #[tokio::test]
    async fn token_signed_by_other_secret_is_invalid_token() {
        let state = AppState::fake("dev-secret", 300);
        let other = AppState::fake("other-secret", 300);
        let token = JwtKeys::from_ref(&other).sign(Uuid::new_v4()).unwrap();
        let mut parts = parts_with_header(Some(&token));
        let err = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidToken));
    }

    #[tokio::test]
    async fn valid_token_resolves_user_id() {
        let state = AppState::fake("dev-secret", 300);
        let user_id = Uuid::new_v4();
        let token = JwtKeys::from_ref(&state).sign(user_id).unwrap();
        let mut parts = parts_with_header(Some(&token));
        let AuthUser(resolved) = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(resolved, user_id);
    }
}
