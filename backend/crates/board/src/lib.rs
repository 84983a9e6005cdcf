//! Board (Posts and Comments) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, ownership guard, repository traits
//! - `application/` - Post/Comment services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Ownership Model
//! Each resource type is registered with one ownership mode:
//! - `IdentityMatch` - the resolved identity must equal the author
//! - `SecretMatch` - a per-resource secret must match (legacy mode)
//!
//! Mutations verify existence first (404), then ownership, then write.
//! Ownership failures surface as HTTP 401 for wire compatibility with
//! the historical API.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::BoardConfig;
pub use application::{CommentService, PostService};
pub use domain::guard::{AccessClaim, Actor, OwnershipMode};
pub use error::{BoardError, BoardResult};
pub use infra::memory::InMemoryBoardRepository;
pub use infra::postgres::PgBoardRepository;
pub use presentation::router::board_router;
