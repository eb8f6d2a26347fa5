//! # ssahub-database
//!
//! The record store facade. [`stores`] declares one trait per entity on top
//! of the generic [`ssahub_core::traits::RecordStore`]; [`repositories`]
//! implements them over PostgreSQL and [`memory`] over concurrent maps for
//! development and tests. [`Stores`] bundles one implementation of each.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod stores;

pub use connection::DatabasePool;
pub use stores::{
    BlogStore, ContactStore, LeaderStore, NewsStore, ResourceStore, Stores, UserStore,
};
