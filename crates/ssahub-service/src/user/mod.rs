//! Back-office accounts: sign-in and administration.

pub mod auth;
pub mod service;

pub use auth::{AuthService, LoginOutcome};
pub use service::{CreateUserRequest, UserService};
