use sqlx::PgPool;
use uuid::Uuid;

use crate::posts::repo_types::{Comment, Like, Post};

impl Post {
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        text: &str,
        name: &str,
        avatar: &str,
    ) -> anyhow::Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (user_id, text, name, avatar)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, text, name, avatar, created_at
            "#,
        )
        .bind(user_id)
        .bind(text)
        .bind(name)
        .bind(avatar)
        .fetch_one(db)
        .await?;
        Ok(post)
    }

    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, text, name, avatar, created_at
            FROM posts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(posts)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, text, name, avatar, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(post)
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn likes(db: &PgPool, post_id: Uuid) -> anyhow::Result<Vec<Like>> {
        let likes = sqlx::query_as::<_, Like>(
            r#"
            SELECT post_id, user_id
            FROM post_likes
            WHERE post_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(post_id)
        .fetch_all(db)
        .await?;
        Ok(likes)
    }

    /// One like per user per post, enforced by the primary key. Returns false
    /// when the caller had already liked it.
    pub async fn add_like(db: &PgPool, post_id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO post_likes (post_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns false when there was no like to remove.
    pub async fn remove_like(db: &PgPool, post_id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
        let result = sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn comments(db: &PgPool, post_id: Uuid) -> anyhow::Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, post_id, user_id, text, name, avatar, created_at
            FROM post_comments
            WHERE post_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(post_id)
        .fetch_all(db)
        .await?;
        Ok(comments)
    }

    pub async fn add_comment(
        db: &PgPool,
        post_id: Uuid,
        user_id: Uuid,
        text: &str,
        name: &str,
        avatar: &str,
    ) -> anyhow::Result<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO post_comments (post_id, user_id, text, name, avatar)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, post_id, user_id, text, name, avatar, created_at
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .bind(text)
        .bind(name)
        .bind(avatar)
        .fetch_one(db)
        .await?;
        Ok(comment)
    }

    pub async fn find_comment(
        db: &PgPool,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> anyhow::Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, post_id, user_id, text, name, avatar, created_at
            FROM post_comments
            WHERE id = $1 AND post_id = $2
            "#,
        )
        .bind(comment_id)
        .bind(post_id)
        .fetch_optional(db)
        .await?;
        Ok(comment)
    }

    pub async fn delete_comment(db: &PgPool, comment_id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM post_comments WHERE id = $1")
            .bind(comment_id)
            .execute(db)
            .await?;
        Ok(())
    }
}
