//! Downloadable study resources and their url/file lifecycle.

pub mod lifecycle;
pub mod service;

pub use lifecycle::{CreatePlan, IncomingFile, UpdatePlan, plan_create, plan_update};
pub use service::{CreateResource, ResourceService, UpdateResource};
