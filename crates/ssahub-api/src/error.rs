//! Error envelope and status mapping used by every handler.

pub use ssahub_core::http::{ApiErrorResponse, status_for};
