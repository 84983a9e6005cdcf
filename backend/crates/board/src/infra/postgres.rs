//! PostgreSQL Repository Implementations
//!
//! The comments table declares ON DELETE CASCADE on its post reference;
//! `delete_cascading` still removes comments explicitly inside the same
//! transaction so the number of removed comments can be reported and the
//! behavior holds on stores without the declared constraint.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{comment::Comment, post::Post};
use crate::domain::guard::EditSecret;
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::error::{BoardError, BoardResult};
use kernel::id::{CommentId, PostId, UserId};

/// PostgreSQL-backed board repository
#[derive(Clone)]
pub struct PgBoardRepository {
    pool: PgPool,
}

impl PgBoardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Post Repository Implementation
// ============================================================================

impl PostRepository for PgBoardRepository {
    async fn create(&self, post: &Post) -> BoardResult<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (
                post_id,
                author_id,
                author_nickname,
                title,
                content,
                edit_secret,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(post.post_id.as_uuid())
        .bind(post.author_id.as_uuid())
        .bind(&post.author_nickname)
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.edit_secret.as_ref().map(|s| s.as_bytes().to_vec()))
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_newest_first(&self) -> BoardResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                post_id,
                author_id,
                author_nickname,
                title,
                content,
                edit_secret,
                created_at,
                updated_at
            FROM posts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_post()).collect()
    }

    async fn find_by_id(&self, post_id: &PostId) -> BoardResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                post_id,
                author_id,
                author_nickname,
                title,
                content,
                edit_secret,
                created_at,
                updated_at
            FROM posts
            WHERE post_id = $1
            "#,
        )
        .bind(post_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_post()).transpose()
    }

    async fn update(&self, post: &Post) -> BoardResult<()> {
        sqlx::query(
            r#"
            UPDATE posts SET
                title = $2,
                content = $3,
                updated_at = $4
            WHERE post_id = $1
            "#,
        )
        .bind(post.post_id.as_uuid())
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_cascading(&self, post_id: &PostId) -> BoardResult<u64> {
        let mut tx = self.pool.begin().await?;

        let comments_deleted = sqlx::query("DELETE FROM comments WHERE post_id = $1")
            .bind(post_id.as_uuid())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM posts WHERE post_id = $1")
            .bind(post_id.as_uuid())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(comments_deleted)
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

impl CommentRepository for PgBoardRepository {
    async fn create(&self, comment: &Comment) -> BoardResult<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (
                comment_id,
                post_id,
                author_id,
                author_nickname,
                body,
                edit_secret,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(comment.comment_id.as_uuid())
        .bind(comment.post_id.as_uuid())
        .bind(comment.author_id.as_uuid())
        .bind(&comment.author_nickname)
        .bind(&comment.body)
        .bind(comment.edit_secret.as_ref().map(|s| s.as_bytes().to_vec()))
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_by_post_newest_first(&self, post_id: &PostId) -> BoardResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT
                comment_id,
                post_id,
                author_id,
                author_nickname,
                body,
                edit_secret,
                created_at,
                updated_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(post_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|r| r.into_comment()).collect()
    }

    async fn find_by_id(&self, comment_id: &CommentId) -> BoardResult<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT
                comment_id,
                post_id,
                author_id,
                author_nickname,
                body,
                edit_secret,
                created_at,
                updated_at
            FROM comments
            WHERE comment_id = $1
            "#,
        )
        .bind(comment_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_comment()).transpose()
    }

    async fn update(&self, comment: &Comment) -> BoardResult<()> {
        sqlx::query(
            r#"
            UPDATE comments SET
                body = $2,
                updated_at = $3
            WHERE comment_id = $1
            "#,
        )
        .bind(comment.comment_id.as_uuid())
        .bind(&comment.body)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, comment_id: &CommentId) -> BoardResult<()> {
        sqlx::query("DELETE FROM comments WHERE comment_id = $1")
            .bind(comment_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct PostRow {
    post_id: Uuid,
    author_id: Uuid,
    author_nickname: String,
    title: String,
    content: String,
    edit_secret: Option<Vec<u8>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> BoardResult<Post> {
        let edit_secret = self
            .edit_secret
            .map(|bytes| {
                EditSecret::from_bytes(&bytes)
                    .ok_or_else(|| BoardError::Internal("Invalid edit secret digest".to_string()))
            })
            .transpose()?;

        Ok(Post {
            post_id: PostId::from_uuid(self.post_id),
            author_id: UserId::from_uuid(self.author_id),
            author_nickname: self.author_nickname,
            title: self.title,
            content: self.content,
            edit_secret,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    comment_id: Uuid,
    post_id: Uuid,
    author_id: Uuid,
    author_nickname: String,
    body: String,
    edit_secret: Option<Vec<u8>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> BoardResult<Comment> {
        let edit_secret = self
            .edit_secret
            .map(|bytes| {
                EditSecret::from_bytes(&bytes)
                    .ok_or_else(|| BoardError::Internal("Invalid edit secret digest".to_string()))
            })
            .transpose()?;

        Ok(Comment {
            comment_id: CommentId::from_uuid(self.comment_id),
            post_id: PostId::from_uuid(self.post_id),
            author_id: UserId::from_uuid(self.author_id),
            author_nickname: self.author_nickname,
            body: self.body,
            edit_secret,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
