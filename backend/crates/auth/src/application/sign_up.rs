//! Sign Up Use Case
//!
//! Creates a new user account after a declarative validation pass.

use std::sync::Arc;

use kernel::validation::Violations;
use platform::password::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, PasswordPolicyError};

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::nickname::Nickname;
use crate::domain::value_object::password::{RawPassword, StoredPassword};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub nickname: String,
    pub password: String,
    pub confirm: String,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub user_id: kernel::id::UserId,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let (nickname, raw_password) = validate(&input)?;

        // Check if nickname is taken
        if self.user_repo.exists_by_nickname(&nickname).await? {
            return Err(AuthError::NicknameTaken);
        }

        // Hash password
        let password = StoredPassword::from_raw(&raw_password, self.config.pepper())?;

        let user = User::new(nickname, password);
        self.user_repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            nickname = %user.nickname,
            "User signed up"
        );

        Ok(SignUpOutput {
            user_id: user.user_id,
        })
    }
}

/// Declarative signup validation
///
/// All fields are checked before returning; the caller receives either the
/// validated value objects or the full list of field violations.
fn validate(input: &SignUpInput) -> Result<(Nickname, RawPassword), Violations> {
    let mut violations = Violations::new();

    if input.nickname.trim().is_empty()
        || input.password.is_empty()
        || input.confirm.is_empty()
    {
        violations.push("body", "Request format is invalid.");
        return Err(violations);
    }

    let nickname = match Nickname::new(&input.nickname) {
        Ok(nickname) => Some(nickname),
        Err(e) => {
            violations.push("nickname", e.to_string());
            None
        }
    };

    let raw_password = match RawPassword::new(input.password.clone()) {
        Ok(raw) => Some(raw),
        Err(e) => {
            violations.push("password", password_policy_message(&e));
            None
        }
    };

    // Password must not contain the nickname
    if let (Some(nickname), Some(raw)) = (&nickname, &raw_password) {
        if raw.contains(nickname.as_str()) {
            violations.push("password", "Password must not contain the nickname.");
        }
    }

    if input.confirm != input.password {
        violations.push(
            "confirm",
            "Password confirmation does not match the password.",
        );
    }

    match (nickname, raw_password) {
        (Some(nickname), Some(raw)) if violations.is_empty() => Ok((nickname, raw)),
        _ => Err(violations),
    }
}

fn password_policy_message(err: &PasswordPolicyError) -> String {
    match err {
        PasswordPolicyError::TooShort { .. } => {
            format!("Password must be at least {} characters.", MIN_PASSWORD_LENGTH)
        }
        PasswordPolicyError::TooLong { .. } => {
            format!("Password must be at most {} characters.", MAX_PASSWORD_LENGTH)
        }
        PasswordPolicyError::EmptyOrWhitespace => "Request format is invalid.".to_string(),
        PasswordPolicyError::InvalidCharacter => {
            "Password contains invalid characters.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryUserRepository;

    fn use_case() -> SignUpUseCase<InMemoryUserRepository> {
        SignUpUseCase::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(AuthConfig::development()),
        )
    }

    fn input(nickname: &str, password: &str, confirm: &str) -> SignUpInput {
        SignUpInput {
            nickname: nickname.to_string(),
            password: password.to_string(),
            confirm: confirm.to_string(),
        }
    }

    #[tokio::test]
    async fn test_signup_success() {
        let use_case = use_case();
        let output = use_case.execute(input("Dev", "pass1", "pass1")).await;
        assert!(output.is_ok());
    }

    #[tokio::test]
    async fn test_missing_fields_rejected() {
        let use_case = use_case();
        let err = use_case.execute(input("", "pass1", "pass1")).await;
        assert!(matches!(err, Err(AuthError::Validation(_))));
        assert_eq!(
            err.unwrap_err().to_string(),
            "Request format is invalid."
        );
    }

    #[tokio::test]
    async fn test_short_nickname_rejected() {
        let use_case = use_case();
        let err = use_case.execute(input("ab", "pass1", "pass1")).await;
        assert!(matches!(err, Err(AuthError::Validation(_))));
    }

    #[tokio::test]
    async fn test_non_alphanumeric_nickname_rejected() {
        let use_case = use_case();
        let err = use_case.execute(input("dev!", "pass1", "pass1")).await;
        assert!(matches!(err, Err(AuthError::Validation(_))));
    }

    #[tokio::test]
    async fn test_short_password_rejected() {
        let use_case = use_case();
        let err = use_case.execute(input("Dev", "123", "123")).await;
        assert!(matches!(err, Err(AuthError::Validation(_))));
        assert_eq!(
            err.unwrap_err().to_string(),
            "Password must be at least 4 characters."
        );
    }

    #[tokio::test]
    async fn test_password_containing_nickname_rejected() {
        let use_case = use_case();
        let err = use_case.execute(input("Dev", "Dev12345", "Dev12345")).await;
        assert!(matches!(err, Err(AuthError::Validation(_))));
        assert_eq!(
            err.unwrap_err().to_string(),
            "Password must not contain the nickname."
        );
    }

    #[tokio::test]
    async fn test_confirm_mismatch_rejected() {
        let use_case = use_case();
        let err = use_case.execute(input("Dev", "pass1", "pass2")).await;
        assert!(matches!(err, Err(AuthError::Validation(_))));
        assert_eq!(
            err.unwrap_err().to_string(),
            "Password confirmation does not match the password."
        );
    }

    #[tokio::test]
    async fn test_duplicate_nickname_rejected() {
        let use_case = use_case();
        use_case
            .execute(input("Dev", "pass1", "pass1"))
            .await
            .unwrap();

        let err = use_case.execute(input("Dev", "other1", "other1")).await;
        assert!(matches!(err, Err(AuthError::NicknameTaken)));
    }

    #[test]
    fn test_validation_collects_multiple_violations() {
        let result = validate(&input("ab", "123", "456"));
        let violations = result.unwrap_err();
        // short nickname, short password, confirm mismatch
        assert_eq!(violations.len(), 3);
    }
}
