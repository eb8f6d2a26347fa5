//! Request DTOs with validation.

use serde::Deserialize;
use validator::Validate;

use ssahub_core::error::AppError;
use ssahub_entity::blog::{BlogCategory, BlogFilter, Visibility};
use ssahub_entity::contact::NewContactMessage;
use ssahub_entity::filter_value;
use ssahub_entity::news::{NewsCategory, NewsFilter};
use ssahub_entity::resource::{ResourceFilter, ResourceKind};

/// Runs `validator` rules and folds the failures into one message.
pub fn validate<T: Validate>(req: &T) -> Result<(), AppError> {
    req.validate().map_err(|errors| {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let reason = errs
                    .iter()
                    .find_map(|e| e.message.as_ref().map(ToString::to_string))
                    .unwrap_or_else(|| "is invalid".to_string());
                format!("{field}: {reason}")
            })
            .collect();
        fields.sort();
        AppError::validation(fields.join("; "))
    })
}

/// Login request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Public contact form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[validate(length(min = 10, message = "Message must be at least 10 characters"))]
    pub message: String,
}

impl ContactRequest {
    pub fn into_draft(self) -> NewContactMessage {
        NewContactMessage {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

/// Admin reply to a contact message.
#[derive(Debug, Clone, Deserialize)]
pub struct RespondRequest {
    #[serde(default)]
    pub response: String,
}

/// `GET /api/resources` query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceQuery {
    pub department: Option<String>,
    pub year: Option<String>,
    pub subject: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl ResourceQuery {
    pub fn into_filter(self) -> Result<ResourceFilter, AppError> {
        Ok(ResourceFilter {
            department: filter_value(self.department.as_deref()),
            year: filter_value(self.year.as_deref()),
            subject: filter_value(self.subject.as_deref()),
            kind: filter_value(self.kind.as_deref())
                .map(|k| k.parse::<ResourceKind>())
                .transpose()?,
        })
    }
}

/// `GET /api/news` query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewsQuery {
    pub category: Option<String>,
    pub limit: Option<u32>,
}

impl NewsQuery {
    pub fn into_filter(self) -> Result<NewsFilter, AppError> {
        let defaults = NewsFilter::default();
        Ok(NewsFilter {
            category: filter_value(self.category.as_deref())
                .map(|c| c.parse::<NewsCategory>())
                .transpose()?,
            limit: self.limit.unwrap_or(defaults.limit),
        })
    }
}

/// `GET /api/blogs` query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogQuery {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
    /// `true` (default), `false`, or `all`; honoured for admins only.
    pub published: Option<String>,
}

impl BlogQuery {
    pub fn into_filter(self) -> Result<BlogFilter, AppError> {
        let visibility = match self.published.as_deref().map(str::trim) {
            None | Some("") | Some("true") => Visibility::Published,
            Some("false") => Visibility::Unpublished,
            Some("all") => Visibility::All,
            Some(other) => {
                return Err(AppError::validation(format!(
                    "Invalid value for 'published': {other}"
                )));
            }
        };
        Ok(BlogFilter {
            visibility,
            category: filter_value(self.category.as_deref())
                .map(|c| c.parse::<BlogCategory>())
                .transpose()?,
            tag: filter_value(self.tag.as_deref()),
            search: filter_value(self.search.as_deref()),
        })
    }
}

/// `?limit=` for the featured blog listings.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitQuery {
    #[serde(default = "default_featured_limit")]
    pub limit: u32,
}

fn default_featured_limit() -> u32 {
    6
}

/// `GET /api/contact` query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactQuery {
    #[serde(rename = "isRead")]
    pub is_read: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_rules() {
        let ok = ContactRequest {
            name: "Abena".into(),
            email: "abena@example.org".into(),
            subject: String::new(),
            message: "I would like to volunteer.".into(),
        };
        assert!(validate(&ok).is_ok());

        let bad = ContactRequest {
            email: "not-an-email".into(),
            message: "short".into(),
            ..ok
        };
        let err = validate(&bad).unwrap_err();
        assert!(err.message.contains("email"));
        assert!(err.message.contains("message"));
    }

    #[test]
    fn test_all_means_no_filter() {
        let filter = ResourceQuery {
            department: Some("all".into()),
            kind: Some("pdf".into()),
            ..Default::default()
        }
        .into_filter()
        .unwrap();
        assert_eq!(filter.department, None);
        assert_eq!(filter.kind, Some(ResourceKind::Pdf));
    }

    #[test]
    fn test_blog_visibility_parsing() {
        let q = BlogQuery {
            published: Some("all".into()),
            ..Default::default()
        };
        assert_eq!(q.into_filter().unwrap().visibility, Visibility::All);
        let q = BlogQuery {
            published: Some("sometimes".into()),
            ..Default::default()
        };
        assert!(q.into_filter().is_err());
    }
}
