//! Sign In Use Case
//!
//! Authenticates a user and issues a bearer token.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::nickname::Nickname;
use crate::domain::value_object::password::RawPassword;
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub nickname: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    /// Bearer token for the credential cookie / Authorization header
    pub token: String,
    pub user_id: UserId,
}

/// Sign in use case
pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        // A nickname that cannot exist is indistinguishable from one that
        // does not exist.
        let nickname =
            Nickname::new(&input.nickname).map_err(|_| AuthError::UnknownNickname)?;

        let user = self
            .user_repo
            .find_by_nickname(&nickname)
            .await?
            .ok_or(AuthError::UnknownNickname)?;

        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::WrongPassword)?;

        if !user.verify_password(&raw_password, self.config.pepper()) {
            tracing::warn!(nickname = %user.nickname, "Login failed: wrong password");
            return Err(AuthError::WrongPassword);
        }

        let token = self.config.token_codec().issue(&user.user_id);

        tracing::info!(
            user_id = %user.user_id,
            nickname = %user.nickname,
            "User signed in"
        );

        Ok(SignInOutput {
            token,
            user_id: user.user_id,
        })
    }
}
