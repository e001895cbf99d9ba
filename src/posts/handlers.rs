use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::{extractors::AuthUser, guard::ensure_owner, repo_types::User},
    error::ApiError,
    posts::{
        dto::{AddCommentRequest, CommentDto, CreatePostRequest, LikeDto, PostDetails},
        repo_types::Post,
    },
    state::AppState,
    validate::Validator,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(create_post).get(list_posts))
        .route("/posts/:id", get(get_post).delete(delete_post))
        .route("/posts/like/:id", put(like_post))
        .route("/posts/unlike/:id", put(unlike_post))
        .route("/posts/comment/:id", post(add_comment))
        .route("/posts/comment/:id/:comment_id", delete(delete_comment))
}

fn parse_post_id(raw: &str) -> Result<Uuid, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound("Post not found"))
}

/// The post, or 404. Handlers that mutate call this before any ownership
/// comparison so a missing resource never reads as a denial.
async fn post_or_404(db: &PgPool, id: Uuid) -> Result<Post, ApiError> {
    Post::find_by_id(db, id)
        .await?
        .ok_or(ApiError::NotFound("Post not found"))
}

async fn details_for(db: &PgPool, post: Post) -> Result<PostDetails, ApiError> {
    let likes = Post::likes(db, post.id).await?;
    let comments = Post::comments(db, post.id).await?;
    Ok(PostDetails::assemble(post, likes, comments))
}

/// POST /api/posts
#[instrument(skip(state, payload))]
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreatePostRequest>,
) -> Result<Json<PostDetails>, ApiError> {
    Validator::new()
        .require(&payload.text, "text", "Text is required")
        .finish()?;

    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;

    let post = Post::create(&state.db, user_id, &payload.text, &user.name, &user.avatar).await?;
    info!(user_id = %user_id, post_id = %post.id, "post created");

    let details = details_for(&state.db, post).await?;
    Ok(Json(details))
}

/// GET /api/posts — the whole feed, newest first.
#[instrument(skip(state))]
pub async fn list_posts(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
) -> Result<Json<Vec<PostDetails>>, ApiError> {
    let posts = Post::list_all(&state.db).await?;
    let mut out = Vec::with_capacity(posts.len());
    for post in posts {
        out.push(details_for(&state.db, post).await?);
    }
    Ok(Json(out))
}

/// GET /api/posts/:id — malformed ids read as absent posts.
#[instrument(skip(state))]
pub async fn get_post(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<PostDetails>, ApiError> {
    let id = parse_post_id(&id)?;
    let post = post_or_404(&state.db, id).await?;
    Ok(Json(details_for(&state.db, post).await?))
}

/// DELETE /api/posts/:id — owner only.
#[instrument(skip(state))]
pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let id = parse_post_id(&id)?;
    let post = post_or_404(&state.db, id).await?;
    ensure_owner(post.user_id, user_id)?;
    Post::delete(&state.db, id).await?;
    info!(user_id = %user_id, post_id = %id, "post removed");
    Ok(Json(json!({ "msg": "Post removed" })))
}

/// PUT /api/posts/like/:id
#[instrument(skip(state))]
pub async fn like_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Vec<LikeDto>>, ApiError> {
    let id = parse_post_id(&id)?;
    let post = post_or_404(&state.db, id).await?;
    if !Post::add_like(&state.db, post.id, user_id).await? {
        return Err(ApiError::BadRequest("Post already liked"));
    }
    let likes = Post::likes(&state.db, post.id).await?;
    Ok(Json(likes.into_iter().map(Into::into).collect()))
}

/// PUT /api/posts/unlike/:id
#[instrument(skip(state))]
pub async fn unlike_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Vec<LikeDto>>, ApiError> {
    let id = parse_post_id(&id)?;
    let post = post_or_404(&state.db, id).await?;
    if !Post::remove_like(&state.db, post.id, user_id).await? {
        return Err(ApiError::BadRequest("Post has not yet been liked"));
    }
    let likes = Post::likes(&state.db, post.id).await?;
    Ok(Json(likes.into_iter().map(Into::into).collect()))
}

/// POST /api/posts/comment/:id
#[instrument(skip(state, payload))]
pub async fn add_comment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<AddCommentRequest>,
) -> Result<Json<Vec<CommentDto>>, ApiError> {
    Validator::new()
        .require(&payload.text, "text", "Text is required")
        .finish()?;

    let id = parse_post_id(&id)?;
    let post = post_or_404(&state.db, id).await?;
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;

    Post::add_comment(&state.db, post.id, user_id, &payload.text, &user.name, &user.avatar)
        .await?;
    info!(user_id = %user_id, post_id = %post.id, "comment added");

    let comments = Post::comments(&state.db, post.id).await?;
    Ok(Json(comments.into_iter().map(Into::into).collect()))
}

/// DELETE /api/posts/comment/:id/:comment_id — comment author only.
#[instrument(skip(state))]
pub async fn delete_comment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path((id, comment_id)): Path<(String, String)>,
) -> Result<Json<Vec<CommentDto>>, ApiError> {
    let id = parse_post_id(&id)?;
    let comment_id: Uuid = comment_id
        .parse()
        .map_err(|_| ApiError::NotFound("Comment does not exist"))?;

    let post = post_or_404(&state.db, id).await?;
    let comment = Post::find_comment(&state.db, post.id, comment_id)
        .await?
        .ok_or(ApiError::NotFound("Comment does not exist"))?;
    ensure_owner(comment.user_id, user_id)?;

    Post::delete_comment(&state.db, comment.id).await?;
    info!(user_id = %user_id, post_id = %post.id, comment_id = %comment.id, "comment removed");

    let comments = Post::comments(&state.db, post.id).await?;
    Ok(Json(comments.into_iter().map(Into::into).collect()))
}
