//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod blog;
pub mod contact;
pub mod health;
pub mod leader;
pub mod news;
pub mod resource;
