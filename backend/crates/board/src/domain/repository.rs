//! Repository Traits
//!
//! Interfaces for post/comment persistence. Implementations are in the
//! infrastructure layer.

use crate::domain::entity::{comment::Comment, post::Post};
use crate::error::BoardResult;
use kernel::id::{CommentId, PostId};

/// Post repository trait
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    /// Create a new post
    async fn create(&self, post: &Post) -> BoardResult<()>;

    /// List all posts, newest first by creation time
    async fn list_newest_first(&self) -> BoardResult<Vec<Post>>;

    /// Find post by ID
    async fn find_by_id(&self, post_id: &PostId) -> BoardResult<Option<Post>>;

    /// Update a post
    async fn update(&self, post: &Post) -> BoardResult<()>;

    /// Delete a post and every comment referencing it
    ///
    /// Returns the number of comments removed.
    async fn delete_cascading(&self, post_id: &PostId) -> BoardResult<u64>;
}

/// Comment repository trait
#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    /// Create a new comment
    async fn create(&self, comment: &Comment) -> BoardResult<()>;

    /// List comments of a post, newest first by creation time
    async fn list_by_post_newest_first(&self, post_id: &PostId) -> BoardResult<Vec<Comment>>;

    /// Find comment by ID
    async fn find_by_id(&self, comment_id: &CommentId) -> BoardResult<Option<Comment>>;

    /// Update a comment
    async fn update(&self, comment: &Comment) -> BoardResult<()>;

    /// Delete a comment
    async fn delete(&self, comment_id: &CommentId) -> BoardResult<()>;
}
