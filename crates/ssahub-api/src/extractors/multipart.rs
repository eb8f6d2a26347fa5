//! Multipart form decoding into text fields and uploaded files.

use std::collections::HashMap;
use std::str::FromStr;

use axum::extract::{FromRequest, Multipart, Request};
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;

use ssahub_core::error::AppError;
use ssahub_storage::UploadedFile;

/// A fully buffered `multipart/form-data` body.
///
/// Text parts are kept by name (last one wins); parts that carry a file
/// name become [`UploadedFile`]s. Empty file parts, which browsers send for
/// untouched file inputs, are dropped.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: Vec<UploadedFile>,
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large("Upload exceeds the maximum request size")
    } else {
        AppError::validation(format!("Multipart error: {}", err.body_text()))
    }
}

impl<S: Send + Sync> FromRequest<S> for MultipartForm {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        let mut form = MultipartForm::default();
        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();
            match field.file_name().map(str::to_string) {
                Some(original_name) => {
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_string();
                    let data = field.bytes().await.map_err(multipart_error)?;
                    if original_name.is_empty() && data.is_empty() {
                        continue;
                    }
                    form.files
                        .push(UploadedFile::new(name, original_name, content_type, data));
                }
                None => {
                    let text = field.text().await.map_err(multipart_error)?;
                    form.fields.insert(name, text);
                }
            }
        }
        Ok(form)
    }
}

impl MultipartForm {
    /// Build a form directly, bypassing the wire format.
    pub fn from_parts(fields: HashMap<String, String>, files: Vec<UploadedFile>) -> Self {
        Self { fields, files }
    }

    /// Trimmed text value; blank values count as absent.
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Trimmed text value, or `MissingRequiredField`.
    pub fn require(&self, name: &str) -> Result<String, AppError> {
        self.text(name).ok_or_else(|| AppError::missing_field(name))
    }

    /// Parsed value if present.
    pub fn parse<T>(&self, name: &str) -> Result<Option<T>, AppError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.text(name)
            .map(|raw| {
                raw.parse::<T>()
                    .map_err(|e| AppError::validation(format!("Invalid value for '{name}': {e}")))
            })
            .transpose()
    }

    /// Parsed value, or `MissingRequiredField` if absent.
    pub fn parse_required<T>(&self, name: &str) -> Result<T, AppError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.parse(name)?.ok_or_else(|| AppError::missing_field(name))
    }

    /// `true`/`false`/`1`/`0`/`on`/`off`, as HTML forms send them.
    pub fn flag(&self, name: &str) -> Result<Option<bool>, AppError> {
        self.text(name)
            .map(|raw| match raw.to_ascii_lowercase().as_str() {
                "true" | "1" | "on" | "yes" => Ok(true),
                "false" | "0" | "off" | "no" => Ok(false),
                _ => Err(AppError::validation(format!(
                    "Invalid value for '{name}': expected a boolean"
                ))),
            })
            .transpose()
    }

    /// Take the file sent in `field`, if any.
    pub fn take_file(&mut self, field: &str) -> Option<UploadedFile> {
        let index = self.files.iter().position(|f| f.field_name == field)?;
        Some(self.files.swap_remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> MultipartForm {
        MultipartForm::from_parts(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            Vec::new(),
        )
    }

    #[test]
    fn test_blank_counts_as_missing() {
        let f = form(&[("title", "   "), ("year", " Year 1 ")]);
        assert_eq!(f.text("title"), None);
        assert_eq!(f.require("year").unwrap(), "Year 1");
        let err = f.require("title").unwrap_err();
        assert_eq!(err.message, "Field 'title' is required");
    }

    #[test]
    fn test_parse_and_flags() {
        let f = form(&[("order", "3"), ("isPublished", "false"), ("bad", "maybe")]);
        assert_eq!(f.parse::<i32>("order").unwrap(), Some(3));
        assert_eq!(f.parse::<i32>("missing").unwrap(), None);
        assert_eq!(f.flag("isPublished").unwrap(), Some(false));
        assert!(f.flag("bad").is_err());
        assert!(f.parse::<i32>("bad").is_err());
    }
}
