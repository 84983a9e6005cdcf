//! Post Entity

use chrono::{DateTime, Utc};
use kernel::id::{PostId, UserId};

use crate::domain::guard::{EditSecret, Owned};

/// Post entity
///
/// The author's nickname is denormalized at creation time; nicknames are
/// immutable, so it never goes stale.
#[derive(Debug, Clone)]
pub struct Post {
    pub post_id: PostId,
    /// Identity that created the post (ownership in IdentityMatch mode)
    pub author_id: UserId,
    pub author_nickname: String,
    pub title: String,
    pub content: String,
    /// Per-resource secret digest (ownership in SecretMatch mode)
    pub edit_secret: Option<EditSecret>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post
    pub fn new(
        author_id: UserId,
        author_nickname: String,
        title: String,
        content: String,
        edit_secret: Option<EditSecret>,
    ) -> Self {
        let now = Utc::now();

        Self {
            post_id: PostId::new(),
            author_id,
            author_nickname,
            title,
            content,
            edit_secret,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace title and content
    pub fn edit(&mut self, title: String, content: String) {
        self.title = title;
        self.content = content;
        self.updated_at = Utc::now();
    }
}

impl Owned for Post {
    fn owner_id(&self) -> &UserId {
        &self.author_id
    }

    fn edit_secret(&self) -> Option<&EditSecret> {
        self.edit_secret.as_ref()
    }
}
