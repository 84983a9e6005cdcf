//! Board Router
//!
//! Read routes are public; every mutating route runs behind the session
//! resolver middleware from the auth crate.

use axum::middleware::from_fn;
use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use auth::domain::repository::UserRepository;
use auth::presentation::middleware::{AuthMiddlewareState, require_identity};

use crate::application::config::BoardConfig;
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::infra::postgres::PgBoardRepository;
use crate::presentation::handlers::{self, BoardAppState};

/// Create the Board router with PostgreSQL repository
pub fn board_router<U>(
    repo: PgBoardRepository,
    config: BoardConfig,
    auth: AuthMiddlewareState<U>,
) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
{
    board_router_generic(repo, config, auth)
}

/// Create a generic Board router for any repository implementation
pub fn board_router_generic<R, U>(
    repo: R,
    config: BoardConfig,
    auth: AuthMiddlewareState<U>,
) -> Router
where
    R: PostRepository + CommentRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let state = BoardAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    let public = Router::new()
        .route("/posts", get(handlers::list_posts::<R>))
        .route("/posts/{post_id}", get(handlers::get_post::<R>))
        .route(
            "/posts/{post_id}/comments",
            get(handlers::list_comments::<R>),
        )
        .with_state(state.clone());

    let protected = Router::new()
        .route("/posts", post(handlers::create_post::<R>))
        .route(
            "/posts/{post_id}",
            put(handlers::update_post::<R>).delete(handlers::delete_post::<R>),
        )
        .route(
            "/posts/{post_id}/comments",
            post(handlers::create_comment::<R>),
        )
        .route(
            "/posts/{post_id}/comments/{comment_id}",
            put(handlers::update_comment::<R>).delete(handlers::delete_comment::<R>),
        )
        .with_state(state)
        .layer(from_fn(
            move |req: axum::extract::Request, next: axum::middleware::Next| {
                let auth = auth.clone();
                async move { require_identity(auth, req, next).await }
            },
        ));

    public.merge(protected)
}
