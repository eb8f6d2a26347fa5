//! Blog category enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use ssahub_core::AppError;

/// Topic category of a blog post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "blog_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BlogCategory {
    Research,
    Experience,
    Tutorial,
    Opinion,
    #[default]
    General,
}

impl BlogCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Research => "research",
            Self::Experience => "experience",
            Self::Tutorial => "tutorial",
            Self::Opinion => "opinion",
            Self::General => "general",
        }
    }
}

impl fmt::Display for BlogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlogCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "research" => Ok(Self::Research),
            "experience" => Ok(Self::Experience),
            "tutorial" => Ok(Self::Tutorial),
            "opinion" => Ok(Self::Opinion),
            "general" => Ok(Self::General),
            _ => Err(AppError::validation(format!(
                "Invalid blog category: '{s}'. Expected one of: research, experience, tutorial, opinion, general"
            ))),
        }
    }
}
