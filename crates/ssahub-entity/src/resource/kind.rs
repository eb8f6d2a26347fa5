//! Resource sub-type and semester enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use ssahub_core::AppError;

/// What a resource points at, which decides how `url`/`file` are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "resource_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// A PDF, usually uploaded.
    Pdf,
    /// An external web link.
    Link,
    /// An externally hosted video.
    Video,
    /// An office document, usually uploaded.
    Document,
    /// Any other uploaded file.
    File,
}

impl ResourceKind {
    /// Kinds whose `url` must be supplied by the caller and never backed by an upload.
    pub fn is_external(&self) -> bool {
        matches!(self, Self::Link | Self::Video)
    }

    /// Kinds whose content may come from an upload.
    pub fn accepts_upload(&self) -> bool {
        !self.is_external()
    }

    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Link => "link",
            Self::Video => "video",
            Self::Document => "document",
            Self::File => "file",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "link" => Ok(Self::Link),
            "video" => Ok(Self::Video),
            "document" => Ok(Self::Document),
            "file" => Ok(Self::File),
            _ => Err(AppError::validation(format!(
                "Invalid resource type: '{s}'. Expected one of: pdf, link, video, document, file"
            ))),
        }
    }
}

/// Academic semester a resource belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "semester")]
pub enum Semester {
    #[serde(rename = "1st")]
    #[sqlx(rename = "1st")]
    First,
    #[serde(rename = "2nd")]
    #[sqlx(rename = "2nd")]
    Second,
    #[default]
    #[serde(rename = "Both")]
    #[sqlx(rename = "Both")]
    Both,
}

impl Semester {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "1st",
            Self::Second => "2nd",
            Self::Both => "Both",
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Semester {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1st" | "first" => Ok(Self::First),
            "2nd" | "second" => Ok(Self::Second),
            "both" => Ok(Self::Both),
            _ => Err(AppError::validation(format!(
                "Invalid semester: '{s}'. Expected one of: 1st, 2nd, Both"
            ))),
        }
    }
}
