//! Repository Traits
//!
//! Interfaces for identity persistence. Implementations are in the
//! infrastructure layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::nickname::Nickname;
use crate::error::AuthResult;
use kernel::id::UserId;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by nickname
    async fn find_by_nickname(&self, nickname: &Nickname) -> AuthResult<Option<User>>;

    /// Check if a nickname is already registered
    async fn exists_by_nickname(&self, nickname: &Nickname) -> AuthResult<bool>;
}
