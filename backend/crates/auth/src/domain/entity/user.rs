//! User Entity
//!
//! A registered identity: nickname plus stored credential.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::nickname::Nickname;
use crate::domain::value_object::password::{RawPassword, StoredPassword};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier (token subject)
    pub user_id: UserId,
    /// Nickname (unique, for login and display)
    pub nickname: Nickname,
    /// Argon2id password hash
    pub password: StoredPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(nickname: Nickname, password: StoredPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            nickname,
            password,
            created_at: now,
            updated_at: now,
        }
    }

    /// Verify a raw password against the stored hash
    pub fn verify_password(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.password.verify(raw, pepper)
    }
}
