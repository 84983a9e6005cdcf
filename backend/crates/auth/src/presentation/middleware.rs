//! Session Resolver Middleware
//!
//! Extracts a bearer credential from the request, resolves the acting
//! identity, and attaches it to the request extensions for downstream
//! handlers. Runs once per protected request.
//!
//! On any failure the response is 401 with a failure-kind-specific
//! message, and the credential cookie is cleared to force re-login.

use axum::Json;
use axum::body::Body;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::ResolveSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::error::AuthError;
use kernel::id::UserId;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// Resolved identity attached to request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub nickname: String,
}

/// Middleware that requires a resolved identity
pub async fn require_identity<R>(
    state: AuthMiddlewareState<R>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let credential = extract_credential(req.headers(), &state.config.cookie_name);

    let resolved = match credential {
        Some(raw) => {
            let use_case =
                ResolveSessionUseCase::new(state.repo.clone(), state.config.clone());
            use_case.execute(&raw).await
        }
        None => Err(AuthError::MissingCredential),
    };

    match resolved {
        Ok(user) => {
            req.extensions_mut().insert(CurrentUser {
                user_id: user.user_id,
                nickname: user.nickname.as_str().to_string(),
            });
            Ok(next.run(req).await)
        }
        Err(e) => Err(rejection_response(&state.config, e)),
    }
}

/// Extract the raw credential from the cookie or the Authorization header
///
/// The cookie stores the space percent-encoded; both slots yield the same
/// `"<scheme> <token>"` form.
fn extract_credential(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(value) = platform::cookie::extract_cookie(headers, cookie_name) {
        return Some(platform::cookie::decode_credential(&value));
    }

    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()
        .map(str::to_string)
}

/// Build the rejection response, clearing the client-held credential
/// for authentication failures
fn rejection_response(config: &AuthConfig, err: AuthError) -> Response {
    if !err.clears_credential() {
        return err.into_response();
    }

    tracing::debug!(error = %err, "Rejected unauthenticated request");

    let clear_cookie = config.cookie_config().build_delete_cookie();
    let message = err.to_string();

    (
        err.status_code(),
        [(header::SET_COOKIE, clear_cookie)],
        Json(serde_json::json!({ "message": message })),
    )
        .into_response()
}
