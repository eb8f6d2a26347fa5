//! PostgreSQL implementations of the record stores.

pub mod blog;
pub mod contact;
pub mod leader;
pub mod news;
pub mod resource;
pub mod user;

pub use blog::BlogRepository;
pub use contact::ContactRepository;
pub use leader::LeaderRepository;
pub use news::NewsRepository;
pub use resource::ResourceRepository;
pub use user::UserRepository;

use ssahub_core::error::{AppError, ErrorKind};

/// Map a sqlx error, turning unique-constraint violations into `Conflict`.
pub(crate) fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        let unique = e
            .as_database_error()
            .is_some_and(|d| d.is_unique_violation());
        if unique {
            AppError::with_source(ErrorKind::Conflict, format!("{context}: already exists"), e)
        } else {
            AppError::with_source(ErrorKind::Database, context, e)
        }
    }
}

/// `%term%` for ILIKE, with the pattern metacharacters escaped.
pub(crate) fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
