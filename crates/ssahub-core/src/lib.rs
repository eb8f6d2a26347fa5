//! # ssahub-core
//!
//! Core crate for SSA Hub. Contains the storage and record-store traits,
//! configuration schemas, and the unified error system.
//!
//! This crate has **no** internal dependencies on other SSA Hub crates.

pub mod config;
pub mod error;
#[cfg(feature = "axum")]
pub mod http;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
