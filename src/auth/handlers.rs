use axum::{
    extract::{FromRef, State},
    routing::post,
    Json, Router,
};
use anyhow::Context;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, PublicUser, RegisterRequest, TokenResponse},
        extractors::AuthUser,
        gravatar::gravatar_url,
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::CreateUserError,
        repo_types::User,
    },
    error::ApiError,
    state::AppState,
    validate::{Validator, MIN_PASSWORD_LEN},
};

pub fn register_routes() -> Router<AppState> {
    Router::new().route("/users", post(register))
}

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth", post(login).get(get_me))
}

/// POST /api/users — register, then log the new user in immediately by
/// issuing a token in the same response.
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    Validator::new()
        .require(&payload.name, "name", "Name is required")
        .require_email(&payload.email, "email")
        .require_min_len(
            &payload.password,
            MIN_PASSWORD_LEN,
            "password",
            "Please enter a password with 6 or more characters",
        )
        .finish()?;

    let hash = hash_password(&payload.password)?;
    let avatar = gravatar_url(&payload.email);

    // The user row is committed first; the token is issued right after.
    let user = match User::create(&state.db, &payload.name, &payload.email, &hash, &avatar).await {
        Ok(u) => u,
        Err(CreateUserError::EmailTaken) => {
            warn!("registration for an already-registered email");
            return Err(ApiError::UserExists);
        }
        Err(CreateUserError::Db(e)) => return Err(ApiError::Internal(e.into())),
    };

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id).context("sign token")?;

    info!(user_id = %user.id, "user registered");
    Ok(Json(TokenResponse { token }))
}

/// POST /api/auth — login. Unknown email and wrong password both collapse
/// into the same `InvalidCredentials` rejection.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    Validator::new()
        .require_email(&payload.email, "email")
        .require(&payload.password, "password", "Password is required")
        .finish()?;

    let user = User::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = %user.id, "login with wrong password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id).context("sign token")?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(TokenResponse { token }))
}

/// GET /api/auth — the authenticated caller's identity, hash excluded.
#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;
    Ok(Json(user.into()))
}
