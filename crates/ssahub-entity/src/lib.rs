//! # ssahub-entity
//!
//! Domain entity models for SSA Hub. Every persisted struct derives
//! `sqlx::FromRow` and serializes with camelCase keys, which is the shape
//! the public site consumes. Each entity comes with a draft (`New*`) used
//! for creation and a patch (`*Patch`) whose `None` fields are left as-is.

pub mod blog;
pub mod contact;
pub mod leader;
pub mod news;
pub mod resource;
pub mod user;

/// Treat `""` and `"all"` as "no filter", the convention of the public site.
pub fn filter_value(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
        .map(str::to_string)
}
