//! Downloadable resources (past papers, slides, links, videos).

pub mod kind;
pub mod model;

pub use kind::{ResourceKind, Semester};
pub use model::{NewResource, Resource, ResourceFilter, ResourcePatch};
