//! Member blog posts.

pub mod category;
pub mod model;

pub use category::BlogCategory;
pub use model::{parse_tags, Blog, BlogFilter, BlogPatch, NewBlog, Visibility};
