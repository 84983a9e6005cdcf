//! API DTOs (Data Transfer Objects)
//!
//! Response field names (`postId`, `createdAt`, ...) are part of the wire
//! contract; compatibility tests match on them literally. Request fields
//! default to empty strings so missing fields reach the declarative
//! validation step instead of failing JSON extraction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{comment::Comment, post::Post};

// ============================================================================
// Posts
// ============================================================================

/// Post create/update request
#[derive(Debug, Clone, Deserialize)]
pub struct PostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Edit secret (secret-owned deployments only)
    pub password: Option<String>,
}

/// Post summary (listing)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub post_id: String,
    pub nickname: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        Self {
            post_id: post.post_id.to_string(),
            nickname: post.author_nickname.clone(),
            title: post.title.clone(),
            created_at: post.created_at,
        }
    }
}

/// Post detail (single post, includes content)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    pub post_id: String,
    pub nickname: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Post> for PostDetail {
    fn from(post: &Post) -> Self {
        Self {
            post_id: post.post_id.to_string(),
            nickname: post.author_nickname.clone(),
            title: post.title.clone(),
            content: post.content.clone(),
            created_at: post.created_at,
        }
    }
}

/// GET /api/posts response
#[derive(Debug, Clone, Serialize)]
pub struct PostListResponse {
    pub data: Vec<PostSummary>,
}

/// GET /api/posts/{postId} response
#[derive(Debug, Clone, Serialize)]
pub struct PostDetailResponse {
    pub data: PostDetail,
}

// ============================================================================
// Comments
// ============================================================================

/// Comment create/update request
#[derive(Debug, Clone, Deserialize)]
pub struct CommentRequest {
    #[serde(default)]
    pub comment: String,
    /// Edit secret (secret-owned deployments only)
    pub password: Option<String>,
}

/// Comment view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub comment_id: String,
    pub user_id: String,
    pub nickname: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Comment> for CommentView {
    fn from(comment: &Comment) -> Self {
        Self {
            comment_id: comment.comment_id.to_string(),
            user_id: comment.author_id.to_string(),
            nickname: comment.author_nickname.clone(),
            comment: comment.body.clone(),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

/// GET /api/posts/{postId}/comments response
#[derive(Debug, Clone, Serialize)]
pub struct CommentListResponse {
    pub comments: Vec<CommentView>,
}

// ============================================================================
// Common
// ============================================================================

/// Body carrying only an edit secret (secret-owned deletions)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretRequest {
    pub password: Option<String>,
}

/// Plain message response
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::UserId;

    #[test]
    fn test_post_summary_field_names() {
        let post = Post::new(
            UserId::new(),
            "Dev".to_string(),
            "Hi".to_string(),
            "Body".to_string(),
            None,
        );

        let json = serde_json::to_value(PostSummary::from(&post)).unwrap();
        let object = json.as_object().unwrap();
        assert!(object.contains_key("postId"));
        assert!(object.contains_key("nickname"));
        assert!(object.contains_key("title"));
        assert!(object.contains_key("createdAt"));
        // Listing omits the content
        assert!(!object.contains_key("content"));
    }

    #[test]
    fn test_post_detail_includes_content() {
        let post = Post::new(
            UserId::new(),
            "Dev".to_string(),
            "Hi".to_string(),
            "Body".to_string(),
            None,
        );

        let json = serde_json::to_value(PostDetail::from(&post)).unwrap();
        assert_eq!(json["content"], "Body");
    }

    #[test]
    fn test_comment_view_field_names() {
        let comment = Comment::new(
            kernel::id::PostId::new(),
            UserId::new(),
            "Dev".to_string(),
            "Nice".to_string(),
            None,
        );

        let json = serde_json::to_value(CommentView::from(&comment)).unwrap();
        let object = json.as_object().unwrap();
        assert!(object.contains_key("commentId"));
        assert!(object.contains_key("userId"));
        assert!(object.contains_key("updatedAt"));
        assert_eq!(json["comment"], "Nice");
    }

    #[test]
    fn test_post_request_defaults_missing_fields() {
        let req: PostRequest = serde_json::from_str(r#"{"title":"Hi"}"#).unwrap();
        assert_eq!(req.title, "Hi");
        assert_eq!(req.content, "");
        assert!(req.password.is_none());
    }
}
