//! Comment Entity

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, PostId, UserId};

use crate::domain::guard::{EditSecret, Owned};

/// Comment entity
///
/// References its parent post; the parent must exist when the comment is
/// created, and deleting the post removes its comments.
#[derive(Debug, Clone)]
pub struct Comment {
    pub comment_id: CommentId,
    pub post_id: PostId,
    /// Identity that wrote the comment (ownership in IdentityMatch mode)
    pub author_id: UserId,
    pub author_nickname: String,
    pub body: String,
    /// Per-resource secret digest (ownership in SecretMatch mode)
    pub edit_secret: Option<EditSecret>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment
    pub fn new(
        post_id: PostId,
        author_id: UserId,
        author_nickname: String,
        body: String,
        edit_secret: Option<EditSecret>,
    ) -> Self {
        let now = Utc::now();

        Self {
            comment_id: CommentId::new(),
            post_id,
            author_id,
            author_nickname,
            body,
            edit_secret,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the comment body
    pub fn edit(&mut self, body: String) {
        self.body = body;
        self.updated_at = Utc::now();
    }
}

impl Owned for Comment {
    fn owner_id(&self) -> &UserId {
        &self.author_id
    }

    fn edit_secret(&self) -> Option<&EditSecret> {
        self.edit_secret.as_ref()
    }
}
