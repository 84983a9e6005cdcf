//! Service-level tests for the board crate
//!
//! Runs the full signup -> login -> resolve -> mutate flow against the
//! in-memory repositories.

use std::sync::Arc;

use auth::application::resolve_session::ResolveSessionUseCase;
use auth::application::sign_in::{SignInInput, SignInUseCase};
use auth::application::sign_up::{SignUpInput, SignUpUseCase};
use auth::{AuthConfig, InMemoryUserRepository};

use crate::application::comment_service::{CommentInput, CommentService};
use crate::application::config::BoardConfig;
use crate::application::post_service::{PostInput, PostService};
use crate::domain::guard::{AccessClaim, Actor};
use crate::error::BoardError;
use crate::infra::memory::InMemoryBoardRepository;

struct Harness {
    users: Arc<InMemoryUserRepository>,
    auth_config: Arc<AuthConfig>,
    posts: PostService<InMemoryBoardRepository>,
    comments: CommentService<InMemoryBoardRepository, InMemoryBoardRepository>,
}

impl Harness {
    fn new(board_config: BoardConfig) -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let auth_config = Arc::new(AuthConfig::development());
        let repo = Arc::new(InMemoryBoardRepository::new());
        let board_config = Arc::new(board_config);

        Self {
            users,
            auth_config,
            posts: PostService::new(repo.clone(), board_config.clone()),
            comments: CommentService::new(repo.clone(), repo, board_config),
        }
    }

    /// Sign up and log in, returning the resolved actor
    async fn register(&self, nickname: &str, password: &str) -> Actor {
        SignUpUseCase::new(self.users.clone(), self.auth_config.clone())
            .execute(SignUpInput {
                nickname: nickname.to_string(),
                password: password.to_string(),
                confirm: password.to_string(),
            })
            .await
            .unwrap();

        let output = SignInUseCase::new(self.users.clone(), self.auth_config.clone())
            .execute(SignInInput {
                nickname: nickname.to_string(),
                password: password.to_string(),
            })
            .await
            .unwrap();

        let user = ResolveSessionUseCase::new(self.users.clone(), self.auth_config.clone())
            .execute(&format!("Bearer {}", output.token))
            .await
            .unwrap();

        Actor {
            user_id: user.user_id,
            nickname: user.nickname.as_str().to_string(),
        }
    }
}

fn post_input(title: &str, content: &str) -> PostInput {
    PostInput {
        title: title.to_string(),
        content: content.to_string(),
        secret: None,
    }
}

fn comment_input(body: &str) -> CommentInput {
    CommentInput {
        body: body.to_string(),
        secret: None,
    }
}

mod post_flow {
    use super::*;

    #[tokio::test]
    async fn test_full_post_lifecycle() {
        let harness = Harness::new(BoardConfig::default());
        let dev = harness.register("Dev", "pass1").await;

        let post_id = harness
            .posts
            .create(&dev, post_input("Hi", "Body"))
            .await
            .unwrap();

        // Newest post comes first
        let listed = harness.posts.list().await.unwrap();
        assert_eq!(listed[0].post_id, post_id);

        // Idempotent read
        let first = harness.posts.get(&post_id).await.unwrap();
        let second = harness.posts.get(&post_id).await.unwrap();
        assert_eq!(first.title, second.title);
        assert_eq!(first.content, second.content);
        assert_eq!(first.updated_at, second.updated_at);

        // Owner can update
        harness
            .posts
            .update(
                &AccessClaim::identity(&dev.user_id),
                &post_id,
                post_input("Hi2", "Body2"),
            )
            .await
            .unwrap();
        assert_eq!(harness.posts.get(&post_id).await.unwrap().title, "Hi2");

        // Owner can delete
        harness
            .posts
            .delete(&AccessClaim::identity(&dev.user_id), &post_id)
            .await
            .unwrap();
        assert!(matches!(
            harness.posts.get(&post_id).await,
            Err(BoardError::PostNotFound)
        ));
    }

    #[tokio::test]
    async fn test_listing_is_newest_first() {
        let harness = Harness::new(BoardConfig::default());
        let dev = harness.register("Dev", "pass1").await;

        let older = harness
            .posts
            .create(&dev, post_input("older", "Body"))
            .await
            .unwrap();
        let newer = harness
            .posts
            .create(&dev, post_input("newer", "Body"))
            .await
            .unwrap();

        let listed = harness.posts.list().await.unwrap();
        let positions: Vec<_> = listed.iter().map(|p| p.post_id).collect();
        let newer_pos = positions.iter().position(|id| *id == newer).unwrap();
        let older_pos = positions.iter().position(|id| *id == older).unwrap();
        assert!(newer_pos < older_pos);
    }

    #[tokio::test]
    async fn test_other_identity_cannot_mutate() {
        let harness = Harness::new(BoardConfig::default());
        let alice = harness.register("Alice", "pass1").await;
        let bob = harness.register("Bob", "pass1").await;

        let post_id = harness
            .posts
            .create(&alice, post_input("Hi", "Body"))
            .await
            .unwrap();

        let bob_claim = AccessClaim::identity(&bob.user_id);

        assert!(matches!(
            harness
                .posts
                .update(&bob_claim, &post_id, post_input("Hacked", "Hacked"))
                .await,
            Err(BoardError::NotResourceOwner)
        ));

        assert!(matches!(
            harness.posts.delete(&bob_claim, &post_id).await,
            Err(BoardError::NotResourceOwner)
        ));

        // Nothing was written
        let post = harness.posts.get(&post_id).await.unwrap();
        assert_eq!(post.title, "Hi");
    }

    #[tokio::test]
    async fn test_missing_fields_rejected() {
        let harness = Harness::new(BoardConfig::default());
        let dev = harness.register("Dev", "pass1").await;

        assert!(matches!(
            harness.posts.create(&dev, post_input("", "Body")).await,
            Err(BoardError::Validation(_))
        ));
        assert!(matches!(
            harness.posts.create(&dev, post_input("Hi", "  ")).await,
            Err(BoardError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_update_missing_post_is_not_found() {
        let harness = Harness::new(BoardConfig::default());
        let dev = harness.register("Dev", "pass1").await;

        // Existence is checked before ownership
        let absent = kernel::id::PostId::new();
        assert!(matches!(
            harness
                .posts
                .update(
                    &AccessClaim::identity(&dev.user_id),
                    &absent,
                    post_input("Hi", "Body")
                )
                .await,
            Err(BoardError::PostNotFound)
        ));
    }
}

mod comment_flow {
    use super::*;

    #[tokio::test]
    async fn test_full_comment_lifecycle() {
        let harness = Harness::new(BoardConfig::default());
        let dev = harness.register("Dev", "pass1").await;

        let post_id = harness
            .posts
            .create(&dev, post_input("Hi", "Body"))
            .await
            .unwrap();

        let comment_id = harness
            .comments
            .create(&dev, &post_id, comment_input("First!"))
            .await
            .unwrap();

        let listed = harness.comments.list(&post_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].body, "First!");

        harness
            .comments
            .update(
                &AccessClaim::identity(&dev.user_id),
                &comment_id,
                comment_input("Edited"),
            )
            .await
            .unwrap();
        assert_eq!(
            harness.comments.list(&post_id).await.unwrap()[0].body,
            "Edited"
        );

        harness
            .comments
            .delete(&AccessClaim::identity(&dev.user_id), &comment_id)
            .await
            .unwrap();

        // A post with no comments reports not found
        assert!(matches!(
            harness.comments.list(&post_id).await,
            Err(BoardError::CommentNotFound)
        ));
    }

    #[tokio::test]
    async fn test_comment_on_missing_post_rejected() {
        let harness = Harness::new(BoardConfig::default());
        let dev = harness.register("Dev", "pass1").await;

        let absent = kernel::id::PostId::new();
        assert!(matches!(
            harness
                .comments
                .create(&dev, &absent, comment_input("orphan"))
                .await,
            Err(BoardError::PostNotFound)
        ));
    }

    #[tokio::test]
    async fn test_empty_comment_rejected() {
        let harness = Harness::new(BoardConfig::default());
        let dev = harness.register("Dev", "pass1").await;

        let post_id = harness
            .posts
            .create(&dev, post_input("Hi", "Body"))
            .await
            .unwrap();

        let err = harness
            .comments
            .create(&dev, &post_id, comment_input("   "))
            .await;
        assert!(matches!(err, Err(BoardError::Validation(_))));
        assert_eq!(
            err.unwrap_err().to_string(),
            "Please enter the comment content."
        );
    }

    #[tokio::test]
    async fn test_other_identity_cannot_mutate_comment() {
        let harness = Harness::new(BoardConfig::default());
        let alice = harness.register("Alice", "pass1").await;
        let bob = harness.register("Bob", "pass1").await;

        let post_id = harness
            .posts
            .create(&alice, post_input("Hi", "Body"))
            .await
            .unwrap();
        let comment_id = harness
            .comments
            .create(&alice, &post_id, comment_input("mine"))
            .await
            .unwrap();

        assert!(matches!(
            harness
                .comments
                .update(
                    &AccessClaim::identity(&bob.user_id),
                    &comment_id,
                    comment_input("not yours")
                )
                .await,
            Err(BoardError::NotResourceOwner)
        ));
    }

    #[tokio::test]
    async fn test_deleting_post_cascades_to_comments() {
        let harness = Harness::new(BoardConfig::default());
        let dev = harness.register("Dev", "pass1").await;

        let post_id = harness
            .posts
            .create(&dev, post_input("Hi", "Body"))
            .await
            .unwrap();
        harness
            .comments
            .create(&dev, &post_id, comment_input("one"))
            .await
            .unwrap();
        harness
            .comments
            .create(&dev, &post_id, comment_input("two"))
            .await
            .unwrap();

        harness
            .posts
            .delete(&AccessClaim::identity(&dev.user_id), &post_id)
            .await
            .unwrap();

        assert!(matches!(
            harness.comments.list(&post_id).await,
            Err(BoardError::CommentNotFound)
        ));
    }
}

mod secret_owned_flow {
    use super::*;

    fn secret_post_input(title: &str, secret: &str) -> PostInput {
        PostInput {
            title: title.to_string(),
            content: "Body".to_string(),
            secret: Some(secret.to_string()),
        }
    }

    #[tokio::test]
    async fn test_secret_owner_can_mutate() {
        let harness = Harness::new(BoardConfig::secret_owned());
        let dev = harness.register("Dev", "pass1").await;

        let post_id = harness
            .posts
            .create(&dev, secret_post_input("Hi", "1234"))
            .await
            .unwrap();

        harness
            .posts
            .update(
                &AccessClaim::secret("1234"),
                &post_id,
                secret_post_input("Hi2", "1234"),
            )
            .await
            .unwrap();

        harness
            .posts
            .delete(&AccessClaim::secret("1234"), &post_id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_wrong_secret_rejected() {
        let harness = Harness::new(BoardConfig::secret_owned());
        let dev = harness.register("Dev", "pass1").await;

        let post_id = harness
            .posts
            .create(&dev, secret_post_input("Hi", "1234"))
            .await
            .unwrap();

        let err = harness
            .posts
            .update(
                &AccessClaim::secret("9999"),
                &post_id,
                secret_post_input("Hi2", "9999"),
            )
            .await;
        assert!(matches!(err, Err(BoardError::SecretMismatch)));
        assert_eq!(err.unwrap_err().to_string(), "Password does not match.");

        // An identity claim is not accepted in secret mode, even the author's
        assert!(matches!(
            harness
                .posts
                .delete(&AccessClaim::identity(&dev.user_id), &post_id)
                .await,
            Err(BoardError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_creating_without_secret_rejected() {
        let harness = Harness::new(BoardConfig::secret_owned());
        let dev = harness.register("Dev", "pass1").await;

        assert!(matches!(
            harness.posts.create(&dev, post_input("Hi", "Body")).await,
            Err(BoardError::Validation(_))
        ));
    }
}
