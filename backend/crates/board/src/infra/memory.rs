//! In-Memory Repository Implementation
//!
//! Used by unit tests and local development without a database.
//! Replicates the cascading post deletion explicitly, since there is no
//! store-level constraint to rely on.

use std::sync::{Arc, RwLock};

use crate::domain::entity::{comment::Comment, post::Post};
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::error::BoardResult;
use kernel::id::{CommentId, PostId};

/// In-memory board repository
#[derive(Clone, Default)]
pub struct InMemoryBoardRepository {
    posts: Arc<RwLock<Vec<Post>>>,
    comments: Arc<RwLock<Vec<Comment>>>,
}

impl InMemoryBoardRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first, insertion order breaking creation-time ties
fn newest_first<T, F>(items: &[T], created_at: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> chrono::DateTime<chrono::Utc>,
{
    let mut sorted: Vec<T> = items.to_vec();
    sorted.reverse();
    sorted.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    sorted
}

impl PostRepository for InMemoryBoardRepository {
    async fn create(&self, post: &Post) -> BoardResult<()> {
        self.posts
            .write()
            .expect("post store poisoned")
            .push(post.clone());
        Ok(())
    }

    async fn list_newest_first(&self) -> BoardResult<Vec<Post>> {
        let posts = self.posts.read().expect("post store poisoned");
        Ok(newest_first(&posts, |p| p.created_at))
    }

    async fn find_by_id(&self, post_id: &PostId) -> BoardResult<Option<Post>> {
        Ok(self
            .posts
            .read()
            .expect("post store poisoned")
            .iter()
            .find(|p| p.post_id == *post_id)
            .cloned())
    }

    async fn update(&self, post: &Post) -> BoardResult<()> {
        let mut posts = self.posts.write().expect("post store poisoned");
        if let Some(stored) = posts.iter_mut().find(|p| p.post_id == post.post_id) {
            *stored = post.clone();
        }
        Ok(())
    }

    async fn delete_cascading(&self, post_id: &PostId) -> BoardResult<u64> {
        let mut comments = self.comments.write().expect("comment store poisoned");
        let before = comments.len();
        comments.retain(|c| c.post_id != *post_id);
        let comments_deleted = (before - comments.len()) as u64;
        drop(comments);

        self.posts
            .write()
            .expect("post store poisoned")
            .retain(|p| p.post_id != *post_id);

        Ok(comments_deleted)
    }
}

impl CommentRepository for InMemoryBoardRepository {
    async fn create(&self, comment: &Comment) -> BoardResult<()> {
        self.comments
            .write()
            .expect("comment store poisoned")
            .push(comment.clone());
        Ok(())
    }

    async fn list_by_post_newest_first(&self, post_id: &PostId) -> BoardResult<Vec<Comment>> {
        let comments = self.comments.read().expect("comment store poisoned");
        let of_post: Vec<Comment> = comments
            .iter()
            .filter(|c| c.post_id == *post_id)
            .cloned()
            .collect();
        Ok(newest_first(&of_post, |c| c.created_at))
    }

    async fn find_by_id(&self, comment_id: &CommentId) -> BoardResult<Option<Comment>> {
        Ok(self
            .comments
            .read()
            .expect("comment store poisoned")
            .iter()
            .find(|c| c.comment_id == *comment_id)
            .cloned())
    }

    async fn update(&self, comment: &Comment) -> BoardResult<()> {
        let mut comments = self.comments.write().expect("comment store poisoned");
        if let Some(stored) = comments
            .iter_mut()
            .find(|c| c.comment_id == comment.comment_id)
        {
            *stored = comment.clone();
        }
        Ok(())
    }

    async fn delete(&self, comment_id: &CommentId) -> BoardResult<()> {
        self.comments
            .write()
            .expect("comment store poisoned")
            .retain(|c| c.comment_id != *comment_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::UserId;

    fn make_post(title: &str) -> Post {
        Post::new(
            UserId::new(),
            "Dev".to_string(),
            title.to_string(),
            "Body".to_string(),
            None,
        )
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let repo = InMemoryBoardRepository::new();

        let mut first = make_post("first");
        let mut second = make_post("second");
        // Force distinct creation times
        first.created_at = chrono::Utc::now() - chrono::Duration::seconds(10);
        second.created_at = chrono::Utc::now();

        PostRepository::create(&repo, &first).await.unwrap();
        PostRepository::create(&repo, &second).await.unwrap();

        let listed = repo.list_newest_first().await.unwrap();
        assert_eq!(listed[0].title, "second");
        assert_eq!(listed[1].title, "first");
    }

    #[tokio::test]
    async fn test_delete_cascading_removes_comments() {
        let repo = InMemoryBoardRepository::new();

        let post = make_post("with comments");
        let other = make_post("untouched");
        PostRepository::create(&repo, &post).await.unwrap();
        PostRepository::create(&repo, &other).await.unwrap();

        let author = UserId::new();
        for body in ["one", "two"] {
            CommentRepository::create(
                &repo,
                &Comment::new(post.post_id, author, "Dev".to_string(), body.to_string(), None),
            )
            .await
            .unwrap();
        }
        CommentRepository::create(
            &repo,
            &Comment::new(
                other.post_id,
                author,
                "Dev".to_string(),
                "keep".to_string(),
                None,
            ),
        )
        .await
        .unwrap();

        let deleted = repo.delete_cascading(&post.post_id).await.unwrap();
        assert_eq!(deleted, 2);

        assert!(
            PostRepository::find_by_id(&repo, &post.post_id)
                .await
                .unwrap()
                .is_none()
        );
        let remaining = repo
            .list_by_post_newest_first(&other.post_id)
            .await
            .unwrap();
        assert_eq!(remaining.len(), 1);
    }
}
