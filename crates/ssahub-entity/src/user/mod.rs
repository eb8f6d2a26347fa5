//! User domain entities.

pub mod model;
pub mod role;

pub use model::{NewUser, User, UserPatch};
pub use role::UserRole;
