//! In-Memory Repository Implementation
//!
//! Used by unit tests and local development without a database.

use std::sync::{Arc, RwLock};

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::nickname::Nickname;
use crate::error::AuthResult;
use kernel::id::UserId;

/// In-memory user repository
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every stored user (simulates account deletion in tests)
    pub fn clear(&self) {
        self.users.write().expect("user store poisoned").clear();
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        self.users
            .write()
            .expect("user store poisoned")
            .push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .read()
            .expect("user store poisoned")
            .iter()
            .find(|u| u.user_id == *user_id)
            .cloned())
    }

    async fn find_by_nickname(&self, nickname: &Nickname) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .read()
            .expect("user store poisoned")
            .iter()
            .find(|u| u.nickname == *nickname)
            .cloned())
    }

    async fn exists_by_nickname(&self, nickname: &Nickname) -> AuthResult<bool> {
        Ok(self
            .users
            .read()
            .expect("user store poisoned")
            .iter()
            .any(|u| u.nickname == *nickname))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::password::{RawPassword, StoredPassword};

    fn make_user(nickname: &str) -> User {
        let raw = RawPassword::new("pass1".to_string()).unwrap();
        User::new(
            Nickname::new(nickname).unwrap(),
            StoredPassword::from_raw(&raw, None).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = InMemoryUserRepository::new();
        let user = make_user("Dev");
        repo.create(&user).await.unwrap();

        let found = repo.find_by_id(&user.user_id).await.unwrap().unwrap();
        assert_eq!(found.nickname.as_str(), "Dev");

        let found = repo
            .find_by_nickname(&Nickname::new("Dev").unwrap())
            .await
            .unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_exists_by_nickname() {
        let repo = InMemoryUserRepository::new();
        repo.create(&make_user("Dev")).await.unwrap();

        assert!(
            repo.exists_by_nickname(&Nickname::new("Dev").unwrap())
                .await
                .unwrap()
        );
        assert!(
            !repo
                .exists_by_nickname(&Nickname::new("Other").unwrap())
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_nickname_is_case_sensitive() {
        let repo = InMemoryUserRepository::new();
        repo.create(&make_user("Dev")).await.unwrap();

        assert!(
            !repo
                .exists_by_nickname(&Nickname::new("dev").unwrap())
                .await
                .unwrap()
        );
    }
}
