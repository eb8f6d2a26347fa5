//! Collision-resistant blob names.
//!
//! A name is `{field}-{unix_millis}-{random}{.ext}`. The millisecond
//! timestamp orders names; 48 random bits keep two uploads in the same
//! millisecond apart without any shared state.

use std::path::Path;

use chrono::Utc;
use uuid::Uuid;

use crate::category::UploadCategory;

const MAX_EXTENSION_LEN: usize = 10;

/// Generate a fresh file name for an upload.
pub fn blob_name(field_name: &str, original_name: &str) -> String {
    let stem = sanitize_stem(field_name);
    let millis = Utc::now().timestamp_millis();
    let random = Uuid::new_v4().simple().to_string();
    let suffix = &random[..12];
    match extension(original_name) {
        Some(ext) => format!("{stem}-{millis}-{suffix}.{ext}"),
        None => format!("{stem}-{millis}-{suffix}"),
    }
}

/// Generate the storage key (`<folder>/<name>`) for an upload.
pub fn blob_key(category: UploadCategory, field_name: &str, original_name: &str) -> String {
    format!("{}/{}", category.folder(), blob_name(field_name, original_name))
}

fn sanitize_stem(field_name: &str) -> String {
    let stem: String = field_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .take(32)
        .collect();
    if stem.is_empty() { "file".to_string() } else { stem }
}

/// Lowercased extension of the original name, if it is plain alphanumeric.
fn extension(original_name: &str) -> Option<String> {
    Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.len() <= MAX_EXTENSION_LEN)
        .filter(|e| e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(str::to_ascii_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_name_shape() {
        let name = blob_name("image", "Portrait.JPG");
        let parts: Vec<&str> = name.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "image");
        assert!(parts[1].parse::<i64>().is_ok());
        assert!(parts[2].ends_with(".jpg"));
        assert_eq!(parts[2].len(), 12 + ".jpg".len());
    }

    #[test]
    fn test_unsafe_parts_are_dropped() {
        let name = blob_name("../../etc", "passwd");
        assert!(name.starts_with("etc-"));
        assert!(!name.contains('/'));
        assert!(!name.contains('.'));

        let name = blob_name("", "x.tar.gz");
        assert!(name.starts_with("file-"));
        assert!(name.ends_with(".gz"));

        let name = blob_name("file", "weird.p/df");
        assert!(!name.contains('/'));
    }

    #[test]
    fn test_key_uses_category_folder() {
        let key = blob_key(UploadCategory::Resources, "file", "notes.pdf");
        assert!(key.starts_with("resources/file-"));
        assert!(key.ends_with(".pdf"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_names_never_collide() {
        let handles: Vec<_> = (0..2000)
            .map(|_| tokio::spawn(async { blob_key(UploadCategory::News, "image", "a.png") }))
            .collect();

        let names = futures::future::join_all(handles).await;
        let mut seen = HashSet::new();
        for name in names {
            assert!(seen.insert(name.unwrap()), "duplicate blob name generated");
        }
        assert_eq!(seen.len(), 2000);
    }
}
