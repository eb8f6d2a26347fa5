//! # ssahub-storage
//!
//! Everything between an uploaded file and the bytes at rest: the
//! per-category media policy, the size ceiling, collision-resistant blob
//! naming, the local and S3 providers, and [`BlobStore`], which ties them
//! together and hands out [`StagedBlob`] reservations.

pub mod blob_store;
pub mod category;
pub mod locator;
pub mod naming;
pub mod providers;
pub mod staged;
pub mod upload;
pub mod validator;

pub use blob_store::BlobStore;
pub use category::{MediaPolicy, UploadCategory};
pub use locator::BlobLocator;
pub use staged::StagedBlob;
pub use upload::{UploadedFile, ValidatedUpload};
pub use validator::UploadValidator;
