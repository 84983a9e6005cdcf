//! Comment Service
//!
//! CRUD over comments. Creation verifies the parent post exists; the
//! historical implementation relied on the store's foreign-key constraint
//! alone, which surfaced as a 5xx instead of a 404.

use std::sync::Arc;

use kernel::validation::Violations;

use crate::application::config::BoardConfig;
use crate::application::post_service::{guard_error, require_claim_secret};
use crate::domain::entity::comment::Comment;
use crate::domain::guard::{AccessClaim, Actor, EditSecret, OwnershipMode, authorize};
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::error::{BoardError, BoardResult};
use kernel::id::{CommentId, PostId};

/// Comment create/update input
pub struct CommentInput {
    pub body: String,
    /// Clear-text edit secret (SecretMatch mode only)
    pub secret: Option<String>,
}

/// Comment service
///
/// Holds the post repository as well, for the parent-existence check.
pub struct CommentService<C, P>
where
    C: CommentRepository,
    P: PostRepository,
{
    comments: Arc<C>,
    posts: Arc<P>,
    config: Arc<BoardConfig>,
}

impl<C, P> CommentService<C, P>
where
    C: CommentRepository,
    P: PostRepository,
{
    pub fn new(comments: Arc<C>, posts: Arc<P>, config: Arc<BoardConfig>) -> Self {
        Self {
            comments,
            posts,
            config,
        }
    }

    /// Create a comment under an existing post
    pub async fn create(
        &self,
        actor: &Actor,
        post_id: &PostId,
        input: CommentInput,
    ) -> BoardResult<CommentId> {
        let input = validate(input, self.config.comment_ownership)?;

        // Parent must exist at creation time
        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(BoardError::PostNotFound);
        }

        let edit_secret = input.secret.as_deref().map(EditSecret::derive);

        let comment = Comment::new(
            *post_id,
            actor.user_id,
            actor.nickname.clone(),
            input.body,
            edit_secret,
        );

        self.comments.create(&comment).await?;

        tracing::info!(
            comment_id = %comment.comment_id,
            post_id = %post_id,
            author = %comment.author_nickname,
            "Comment created"
        );

        Ok(comment.comment_id)
    }

    /// List a post's comments, newest first
    ///
    /// A post with no comments is reported as not found; clients of the
    /// historical API match on that 404.
    pub async fn list(&self, post_id: &PostId) -> BoardResult<Vec<Comment>> {
        let comments = self.comments.list_by_post_newest_first(post_id).await?;

        if comments.is_empty() {
            return Err(BoardError::CommentNotFound);
        }

        Ok(comments)
    }

    /// Update a comment's body
    pub async fn update(
        &self,
        claim: &AccessClaim<'_>,
        comment_id: &CommentId,
        input: CommentInput,
    ) -> BoardResult<()> {
        let input = validate(input, self.config.comment_ownership)?;

        let mut comment = self
            .comments
            .find_by_id(comment_id)
            .await?
            .ok_or(BoardError::CommentNotFound)?;

        authorize(self.config.comment_ownership, &comment, claim).map_err(guard_error)?;

        comment.edit(input.body);
        self.comments.update(&comment).await?;

        tracing::info!(comment_id = %comment_id, "Comment updated");

        Ok(())
    }

    /// Delete a comment
    pub async fn delete(
        &self,
        claim: &AccessClaim<'_>,
        comment_id: &CommentId,
    ) -> BoardResult<()> {
        require_claim_secret(claim, self.config.comment_ownership)?;

        let comment = self
            .comments
            .find_by_id(comment_id)
            .await?
            .ok_or(BoardError::CommentNotFound)?;

        authorize(self.config.comment_ownership, &comment, claim).map_err(guard_error)?;

        self.comments.delete(comment_id).await?;

        tracing::info!(comment_id = %comment_id, "Comment deleted");

        Ok(())
    }
}

/// Declarative validation of comment input
fn validate(input: CommentInput, mode: OwnershipMode) -> Result<CommentInput, Violations> {
    let mut violations = Violations::new();

    if input.body.trim().is_empty() {
        violations.push("comment", "Please enter the comment content.");
    }

    if mode == OwnershipMode::SecretMatch
        && input.secret.as_deref().unwrap_or("").trim().is_empty()
    {
        violations.push("password", "Request format is invalid.");
    }

    violations.into_result(input)
}
