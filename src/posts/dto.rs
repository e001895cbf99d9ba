use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::posts::repo_types::{Comment, Like, Post};

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    #[serde(default)]
    pub text: String,
}

/// A like as the client sees it: just the liker.
#[derive(Debug, Serialize)]
pub struct LikeDto {
    pub user: Uuid,
}

impl From<Like> for LikeDto {
    fn from(l: Like) -> Self {
        Self { user: l.user_id }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentDto {
    pub id: Uuid,
    pub user: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub created_at: OffsetDateTime,
}

impl From<Comment> for CommentDto {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            user: c.user_id,
            text: c.text,
            name: c.name,
            avatar: c.avatar,
            created_at: c.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostDetails {
    pub id: Uuid,
    pub user: Uuid,
    pub text: String,
    pub name: String,
    pub avatar: String,
    pub likes: Vec<LikeDto>,
    pub comments: Vec<CommentDto>,
    pub created_at: OffsetDateTime,
}

impl PostDetails {
    pub fn assemble(post: Post, likes: Vec<Like>, comments: Vec<Comment>) -> Self {
        Self {
            id: post.id,
            user: post.user_id,
            text: post.text,
            name: post.name,
            avatar: post.avatar,
            likes: likes.into_iter().map(Into::into).collect(),
            comments: comments.into_iter().map(Into::into).collect(),
            created_at: post.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_details_keeps_author_snapshot() {
        let owner = Uuid::new_v4();
        let post = Post {
            id: Uuid::new_v4(),
            user_id: owner,
            text: "hello".into(),
            name: "Matt".into(),
            avatar: "https://www.gravatar.com/avatar/x".into(),
            created_at: OffsetDateTime::now_utc(),
        };
        let like = Like {
            post_id: post.id,
            user_id: owner,
        };
        let details = PostDetails::assemble(post, vec![like], vec![]);
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["user"], json["likes"][0]["user"]);
        assert_eq!(json["name"], "Matt");
        assert!(json["comments"].as_array().unwrap().is_empty());
    }
}
