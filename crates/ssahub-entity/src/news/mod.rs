//! News articles and announcements.

pub mod category;
pub mod model;

pub use category::NewsCategory;
pub use model::{DEFAULT_AUTHOR, News, NewsFilter, NewsPatch, NewNews};
