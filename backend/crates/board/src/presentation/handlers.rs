//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Extension;
use std::sync::Arc;

use auth::CurrentUser;
use kernel::id::{CommentId, PostId};
use kernel::validation::Violations;

use crate::application::comment_service::{CommentInput, CommentService};
use crate::application::config::BoardConfig;
use crate::application::post_service::{PostInput, PostService};
use crate::domain::guard::{AccessClaim, Actor};
use crate::error::{BoardError, BoardResult};
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::presentation::dto::{
    CommentListResponse, CommentRequest, CommentView, MessageResponse, PostDetailResponse,
    PostListResponse, PostRequest, PostSummary, SecretRequest,
};

/// Shared state for board handlers
#[derive(Clone)]
pub struct BoardAppState<R>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<BoardConfig>,
}

impl<R> BoardAppState<R>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    fn post_service(&self) -> PostService<R> {
        PostService::new(self.repo.clone(), self.config.clone())
    }

    fn comment_service(&self) -> CommentService<R, R> {
        CommentService::new(self.repo.clone(), self.repo.clone(), self.config.clone())
    }
}

/// Parse a path segment into a typed ID
///
/// An unparseable ID means the request format is wrong, not that the
/// resource is missing.
fn parse_id<T>(raw: &str) -> BoardResult<kernel::id::Id<T>> {
    raw.parse().map_err(|_| {
        let mut violations = Violations::new();
        violations.push("params", "Request format is invalid.");
        BoardError::Validation(violations)
    })
}

fn actor_of(user: &CurrentUser) -> Actor {
    Actor {
        user_id: user.user_id,
        nickname: user.nickname.clone(),
    }
}

// ============================================================================
// Posts
// ============================================================================

/// POST /api/posts
pub async fn create_post<R>(
    State(state): State<BoardAppState<R>>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<PostRequest>,
) -> BoardResult<impl IntoResponse>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let input = PostInput {
        title: req.title,
        content: req.content,
        secret: req.password,
    };

    state.post_service().create(&actor_of(&user), input).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Post created successfully.")),
    ))
}

/// GET /api/posts
pub async fn list_posts<R>(
    State(state): State<BoardAppState<R>>,
) -> BoardResult<Json<PostListResponse>>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let posts = state.post_service().list().await?;

    Ok(Json(PostListResponse {
        data: posts.iter().map(PostSummary::from).collect(),
    }))
}

/// GET /api/posts/{postId}
pub async fn get_post<R>(
    State(state): State<BoardAppState<R>>,
    Path(post_id): Path<String>,
) -> BoardResult<Json<PostDetailResponse>>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let post_id: PostId = parse_id(&post_id)?;
    let post = state.post_service().get(&post_id).await?;

    Ok(Json(PostDetailResponse {
        data: (&post).into(),
    }))
}

/// PUT /api/posts/{postId}
pub async fn update_post<R>(
    State(state): State<BoardAppState<R>>,
    Extension(user): Extension<CurrentUser>,
    Path(post_id): Path<String>,
    Json(req): Json<PostRequest>,
) -> BoardResult<impl IntoResponse>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let post_id: PostId = parse_id(&post_id)?;

    let claim = AccessClaim::new(Some(&user.user_id), req.password.as_deref());
    let input = PostInput {
        title: req.title,
        content: req.content,
        secret: req.password.clone(),
    };

    state.post_service().update(&claim, &post_id, input).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse::new("Post updated successfully.")),
    ))
}

/// DELETE /api/posts/{postId}
pub async fn delete_post<R>(
    State(state): State<BoardAppState<R>>,
    Extension(user): Extension<CurrentUser>,
    Path(post_id): Path<String>,
    body: Option<Json<SecretRequest>>,
) -> BoardResult<impl IntoResponse>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let post_id: PostId = parse_id(&post_id)?;

    let secret = body.and_then(|Json(req)| req.password);
    let claim = AccessClaim::new(Some(&user.user_id), secret.as_deref());

    state.post_service().delete(&claim, &post_id).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse::new("Post deleted successfully.")),
    ))
}

// ============================================================================
// Comments
// ============================================================================

/// POST /api/posts/{postId}/comments
pub async fn create_comment<R>(
    State(state): State<BoardAppState<R>>,
    Extension(user): Extension<CurrentUser>,
    Path(post_id): Path<String>,
    Json(req): Json<CommentRequest>,
) -> BoardResult<impl IntoResponse>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let post_id: PostId = parse_id(&post_id)?;

    let input = CommentInput {
        body: req.comment,
        secret: req.password,
    };

    state
        .comment_service()
        .create(&actor_of(&user), &post_id, input)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Comment created successfully.")),
    ))
}

/// GET /api/posts/{postId}/comments
pub async fn list_comments<R>(
    State(state): State<BoardAppState<R>>,
    Path(post_id): Path<String>,
) -> BoardResult<Json<CommentListResponse>>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let post_id: PostId = parse_id(&post_id)?;
    let comments = state.comment_service().list(&post_id).await?;

    Ok(Json(CommentListResponse {
        comments: comments.iter().map(CommentView::from).collect(),
    }))
}

/// PUT /api/posts/{postId}/comments/{commentId}
pub async fn update_comment<R>(
    State(state): State<BoardAppState<R>>,
    Extension(user): Extension<CurrentUser>,
    Path((_post_id, comment_id)): Path<(String, String)>,
    Json(req): Json<CommentRequest>,
) -> BoardResult<impl IntoResponse>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let comment_id: CommentId = parse_id(&comment_id)?;

    let claim = AccessClaim::new(Some(&user.user_id), req.password.as_deref());
    let input = CommentInput {
        body: req.comment,
        secret: req.password.clone(),
    };

    state
        .comment_service()
        .update(&claim, &comment_id, input)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse::new("Comment updated successfully.")),
    ))
}

/// DELETE /api/posts/{postId}/comments/{commentId}
pub async fn delete_comment<R>(
    State(state): State<BoardAppState<R>>,
    Extension(user): Extension<CurrentUser>,
    Path((_post_id, comment_id)): Path<(String, String)>,
    body: Option<Json<SecretRequest>>,
) -> BoardResult<impl IntoResponse>
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
{
    let comment_id: CommentId = parse_id(&comment_id)?;

    let secret = body.and_then(|Json(req)| req.password);
    let claim = AccessClaim::new(Some(&user.user_id), secret.as_deref());

    state
        .comment_service()
        .delete(&claim, &comment_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse::new("Comment deleted successfully.")),
    ))
}
