//! Leaders, news, and blogs: records with a single optional image.
//!
//! All three follow the same image rule. A new image is staged before the
//! record write and released if that write fails; the image it replaces is
//! deleted only after the write succeeded.

pub mod blog;
pub mod leader;
pub mod news;

pub use blog::BlogService;
pub use leader::LeaderService;
pub use news::NewsService;

use ssahub_storage::BlobStore;

/// Delete `old` if an update swapped it for `new`.
pub(crate) async fn prune_replaced(blobs: &BlobStore, old: &str, new: &str) {
    if !old.is_empty() && old != new {
        blobs.delete_str(old).await;
    }
}
