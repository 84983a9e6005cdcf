//! Post Service
//!
//! CRUD over posts. Mutations check existence first (404), then the
//! ownership guard (401), then write; the guard failing short-circuits
//! before any write.

use std::sync::Arc;

use kernel::validation::{Violations, require_non_empty};

use crate::application::config::BoardConfig;
use crate::domain::entity::post::Post;
use crate::domain::guard::{AccessClaim, Actor, EditSecret, GuardError, OwnershipMode, authorize};
use crate::domain::repository::PostRepository;
use crate::error::{BoardError, BoardResult};
use kernel::id::PostId;

/// Post create/update input
pub struct PostInput {
    pub title: String,
    pub content: String,
    /// Clear-text edit secret (SecretMatch mode only)
    pub secret: Option<String>,
}

/// Post service
pub struct PostService<P>
where
    P: PostRepository,
{
    posts: Arc<P>,
    config: Arc<BoardConfig>,
}

impl<P> PostService<P>
where
    P: PostRepository,
{
    pub fn new(posts: Arc<P>, config: Arc<BoardConfig>) -> Self {
        Self { posts, config }
    }

    /// Create a post authored by `actor`
    pub async fn create(&self, actor: &Actor, input: PostInput) -> BoardResult<PostId> {
        let input = validate(input, self.config.post_ownership)?;

        let edit_secret = input.secret.as_deref().map(EditSecret::derive);

        let post = Post::new(
            actor.user_id,
            actor.nickname.clone(),
            input.title,
            input.content,
            edit_secret,
        );

        self.posts.create(&post).await?;

        tracing::info!(
            post_id = %post.post_id,
            author = %post.author_nickname,
            "Post created"
        );

        Ok(post.post_id)
    }

    /// List all posts, newest first
    pub async fn list(&self) -> BoardResult<Vec<Post>> {
        self.posts.list_newest_first().await
    }

    /// Get a single post with its content
    pub async fn get(&self, post_id: &PostId) -> BoardResult<Post> {
        self.posts
            .find_by_id(post_id)
            .await?
            .ok_or(BoardError::PostNotFound)
    }

    /// Update a post's title and content
    pub async fn update(
        &self,
        claim: &AccessClaim<'_>,
        post_id: &PostId,
        input: PostInput,
    ) -> BoardResult<()> {
        let input = validate(input, self.config.post_ownership)?;

        // Existence before ownership, so a missing post is 404 even for
        // a caller who could never have owned it
        let mut post = self.get(post_id).await?;

        authorize(self.config.post_ownership, &post, claim).map_err(guard_error)?;

        post.edit(input.title, input.content);
        self.posts.update(&post).await?;

        tracing::info!(post_id = %post.post_id, "Post updated");

        Ok(())
    }

    /// Delete a post and its comments
    pub async fn delete(&self, claim: &AccessClaim<'_>, post_id: &PostId) -> BoardResult<()> {
        require_claim_secret(claim, self.config.post_ownership)?;

        let post = self.get(post_id).await?;

        authorize(self.config.post_ownership, &post, claim).map_err(guard_error)?;

        let comments_deleted = self.posts.delete_cascading(post_id).await?;

        tracing::info!(
            post_id = %post_id,
            comments_deleted,
            "Post deleted"
        );

        Ok(())
    }
}

/// Declarative validation of post input
fn validate(input: PostInput, mode: OwnershipMode) -> Result<PostInput, Violations> {
    let mut violations = Violations::new();

    require_non_empty(
        &mut violations,
        "title",
        &input.title,
        "Request format is invalid.",
    );
    require_non_empty(
        &mut violations,
        "content",
        &input.content,
        "Request format is invalid.",
    );

    // Secret-owned resources must be created with a secret
    if mode == OwnershipMode::SecretMatch
        && input.secret.as_deref().unwrap_or("").trim().is_empty()
    {
        violations.push("password", "Request format is invalid.");
    }

    violations.into_result(input)
}

/// Secret-owned deletions must carry the secret in the request body
pub(crate) fn require_claim_secret(
    claim: &AccessClaim<'_>,
    mode: OwnershipMode,
) -> BoardResult<()> {
    if mode == OwnershipMode::SecretMatch
        && claim.secret.is_none_or(|s| s.trim().is_empty())
    {
        let mut violations = Violations::new();
        violations.push("password", "Request format is invalid.");
        return Err(violations.into());
    }
    Ok(())
}

pub(crate) fn guard_error(err: GuardError) -> BoardError {
    match err {
        GuardError::IdentityMismatch => BoardError::NotResourceOwner,
        GuardError::SecretMismatch => BoardError::SecretMismatch,
    }
}
