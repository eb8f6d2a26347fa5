//! Core traits defined in `ssahub-core` and implemented by other crates.

pub mod repository;
pub mod storage;

pub use repository::{RecordStore, SoftDelete};
pub use storage::StorageProvider;
