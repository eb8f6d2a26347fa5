//! Messages sent through the public contact form.

pub mod model;

pub use model::{ContactFilter, ContactMessage, ContactPatch, NewContactMessage};
