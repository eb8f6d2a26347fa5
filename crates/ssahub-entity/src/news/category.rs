//! News category enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use ssahub_core::AppError;

/// Editorial category of a news item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "news_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NewsCategory {
    Announcement,
    Achievement,
    Event,
    #[default]
    General,
}

impl NewsCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Announcement => "announcement",
            Self::Achievement => "achievement",
            Self::Event => "event",
            Self::General => "general",
        }
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NewsCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "announcement" => Ok(Self::Announcement),
            "achievement" => Ok(Self::Achievement),
            "event" => Ok(Self::Event),
            "general" => Ok(Self::General),
            _ => Err(AppError::validation(format!(
                "Invalid news category: '{s}'. Expected one of: announcement, achievement, event, general"
            ))),
        }
    }
}
