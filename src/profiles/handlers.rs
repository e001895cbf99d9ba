use axum::{
    extract::{Path, State},
    routing::{delete, get, put},
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::{extractors::AuthUser, guard::ensure_owner, repo_types::User},
    error::ApiError,
    profiles::{
        dto::{AddEducationRequest, AddExperienceRequest, ProfileDetails, UpsertProfileRequest},
        repo::{NewEducation, NewExperience},
        repo_types::{Profile, ProfileWithOwner},
    },
    state::AppState,
    validate::Validator,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/profile",
            get(list_profiles).post(upsert_profile).delete(delete_account),
        )
        .route("/profile/me", get(get_my_profile))
        .route("/profile/user/:user_id", get(get_profile_by_user))
        .route("/profile/experience", put(add_experience))
        .route("/profile/experience/:exp_id", delete(delete_experience))
        .route("/profile/education", put(add_education))
        .route("/profile/education/:edu_id", delete(delete_education))
}

async fn details_for(db: &PgPool, row: ProfileWithOwner) -> Result<ProfileDetails, ApiError> {
    let experience = Profile::experience(db, row.profile.id).await?;
    let education = Profile::education(db, row.profile.id).await?;
    Ok(ProfileDetails::assemble(
        row.profile,
        row.owner_name,
        row.owner_avatar,
        experience,
        education,
    ))
}

/// The caller's own profile, or 404 when one was never created.
async fn caller_profile(db: &PgPool, user_id: Uuid) -> Result<ProfileWithOwner, ApiError> {
    Profile::find_by_user_with_owner(db, user_id)
        .await?
        .ok_or(ApiError::NotFound("There is no profile for this user"))
}

/// GET /api/profile/me
#[instrument(skip(state))]
pub async fn get_my_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileDetails>, ApiError> {
    let row = caller_profile(&state.db, user_id).await?;
    Ok(Json(details_for(&state.db, row).await?))
}

/// POST /api/profile — create or update the caller's profile.
#[instrument(skip(state, payload))]
pub async fn upsert_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpsertProfileRequest>,
) -> Result<Json<ProfileDetails>, ApiError> {
    Validator::new()
        .require(&payload.status, "status", "Status is required")
        .require(&payload.skills, "skills", "Skills is required")
        .finish()?;

    let fields = payload.into_fields();
    Profile::upsert(&state.db, user_id, &fields).await?;
    info!(user_id = %user_id, "profile upserted");

    let row = caller_profile(&state.db, user_id).await?;
    Ok(Json(details_for(&state.db, row).await?))
}

/// GET /api/profile — every profile with its owner's name and avatar.
#[instrument(skip(state))]
pub async fn list_profiles(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProfileDetails>>, ApiError> {
    let rows = Profile::list_with_owners(&state.db).await?;
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        out.push(details_for(&state.db, row).await?);
    }
    Ok(Json(out))
}

/// GET /api/profile/user/:user_id — malformed ids read as absent profiles.
#[instrument(skip(state))]
pub async fn get_profile_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ProfileDetails>, ApiError> {
    let user_id: Uuid = user_id
        .parse()
        .map_err(|_| ApiError::NotFound("Profile not found"))?;
    let row = Profile::find_by_user_with_owner(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound("Profile not found"))?;
    Ok(Json(details_for(&state.db, row).await?))
}

/// DELETE /api/profile — remove the caller's user; profile and posts cascade.
#[instrument(skip(state))]
pub async fn delete_account(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    User::delete(&state.db, user_id).await?;
    info!(user_id = %user_id, "account deleted");
    Ok(Json(json!({ "msg": "User deleted" })))
}

/// PUT /api/profile/experience
#[instrument(skip(state, payload))]
pub async fn add_experience(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<AddExperienceRequest>,
) -> Result<Json<ProfileDetails>, ApiError> {
    Validator::new()
        .require(&payload.title, "title", "Title is required")
        .require(&payload.company, "company", "Company is required")
        .require_present(&payload.from, "from", "From date is required")
        .finish()?;
    // finish() already rejected a missing from date
    let from_date = payload
        .from
        .ok_or(ApiError::BadRequest("From date is required"))?;

    let row = caller_profile(&state.db, user_id).await?;
    let exp = NewExperience {
        title: payload.title,
        company: payload.company,
        location: payload.location,
        from_date,
        to_date: payload.to,
        current: payload.current,
        description: payload.description,
    };
    Profile::add_experience(&state.db, row.profile.id, &exp).await?;

    let row = caller_profile(&state.db, user_id).await?;
    Ok(Json(details_for(&state.db, row).await?))
}

/// DELETE /api/profile/experience/:exp_id — 404 before the ownership check.
#[instrument(skip(state))]
pub async fn delete_experience(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(exp_id): Path<String>,
) -> Result<Json<ProfileDetails>, ApiError> {
    let exp_id: Uuid = exp_id
        .parse()
        .map_err(|_| ApiError::NotFound("Experience not found"))?;
    let owner = Profile::find_experience_owner(&state.db, exp_id)
        .await?
        .ok_or(ApiError::NotFound("Experience not found"))?;
    ensure_owner(owner, user_id)?;
    Profile::delete_experience(&state.db, exp_id).await?;

    let row = caller_profile(&state.db, user_id).await?;
    Ok(Json(details_for(&state.db, row).await?))
}

/// PUT /api/profile/education
#[instrument(skip(state, payload))]
pub async fn add_education(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<AddEducationRequest>,
) -> Result<Json<ProfileDetails>, ApiError> {
    Validator::new()
        .require(&payload.school, "school", "School is required")
        .require(&payload.degree, "degree", "Degree is required")
        .require(
            &payload.field_of_study,
            "fieldofstudy",
            "Field of study is required",
        )
        .require_present(&payload.from, "from", "From date is required")
        .finish()?;
    // finish() already rejected a missing from date
    let from_date = payload
        .from
        .ok_or(ApiError::BadRequest("From date is required"))?;

    let row = caller_profile(&state.db, user_id).await?;
    let edu = NewEducation {
        school: payload.school,
        degree: payload.degree,
        field_of_study: payload.field_of_study,
        from_date,
        to_date: payload.to,
        current: payload.current,
        description: payload.description,
    };
    Profile::add_education(&state.db, row.profile.id, &edu).await?;

    let row = caller_profile(&state.db, user_id).await?;
    Ok(Json(details_for(&state.db, row).await?))
}

/// DELETE /api/profile/education/:edu_id — 404 before the ownership check.
#[instrument(skip(state))]
pub async fn delete_education(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(edu_id): Path<String>,
) -> Result<Json<ProfileDetails>, ApiError> {
    let edu_id: Uuid = edu_id
        .parse()
        .map_err(|_| ApiError::NotFound("Education not found"))?;
    let owner = Profile::find_education_owner(&state.db, edu_id)
        .await?
        .ok_or(ApiError::NotFound("Education not found"))?;
    ensure_owner(owner, user_id)?;
    Profile::delete_education(&state.db, edu_id).await?;

    let row = caller_profile(&state.db, user_id).await?;
    Ok(Json(details_for(&state.db, row).await?))
}
