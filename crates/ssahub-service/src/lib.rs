//! # ssahub-service
//!
//! Business logic for SSA Hub. Each service owns the record store it needs
//! and, where records carry uploads, the shared [`ssahub_storage::BlobStore`].
//!
//! Services follow constructor injection; all dependencies are provided
//! at construction time via `Arc` references.

pub mod contact;
pub mod content;
pub mod context;
pub mod resource;
mod staging;
pub mod user;

pub use contact::ContactService;
pub use content::{BlogService, LeaderService, NewsService};
pub use context::RequestContext;
pub use resource::ResourceService;
pub use user::{AuthService, UserService};

#[cfg(test)]
pub(crate) mod testing;
