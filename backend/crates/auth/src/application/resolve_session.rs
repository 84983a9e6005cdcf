//! Resolve Session Use Case
//!
//! Turns a raw scheme-prefixed credential into the acting identity:
//! parse the scheme, verify the token, load the subject from the user
//! store. Looking the subject up doubles as a revocation check for
//! identities removed after token issuance.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::token::CREDENTIAL_SCHEME;
use crate::error::{AuthError, AuthResult};

/// Resolve session use case
pub struct ResolveSessionUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> ResolveSessionUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Resolve the acting identity from a `"<scheme> <token>"` credential
    ///
    /// Never mutates the user store.
    pub async fn execute(&self, credential: &str) -> AuthResult<User> {
        let token = parse_credential(credential)?;

        let subject = self.config.token_codec().verify(token)?;

        self.user_repo
            .find_by_id(&subject)
            .await?
            .ok_or(AuthError::UnknownSubject)
    }
}

/// Split a credential into scheme and token, requiring the Bearer scheme
fn parse_credential(credential: &str) -> AuthResult<&str> {
    let (scheme, token) = credential
        .split_once(' ')
        .ok_or(AuthError::UnsupportedScheme)?;

    if scheme != CREDENTIAL_SCHEME {
        return Err(AuthError::UnsupportedScheme);
    }

    Ok(token)
}
