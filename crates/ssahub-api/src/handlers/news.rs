//! News handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use ssahub_core::error::AppError;
use ssahub_entity::news::{DEFAULT_AUTHOR, NewNews, News, NewsPatch};

use crate::dto::request::NewsQuery;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::{AuthUser, MultipartForm};
use crate::state::AppState;

const IMAGE_FIELD: &str = "image";

fn new_news(form: &MultipartForm) -> Result<NewNews, AppError> {
    Ok(NewNews {
        title: form.require("title")?,
        summary: form.require("summary")?,
        content: form.require("content")?,
        author: form.text("author").unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
        category: form.parse("category")?.unwrap_or_default(),
        is_published: form.flag("isPublished")?.unwrap_or(true),
        publish_date: form.parse::<DateTime<Utc>>("publishDate")?,
        image: String::new(),
    })
}

fn news_patch(form: &MultipartForm) -> Result<NewsPatch, AppError> {
    Ok(NewsPatch {
        title: form.text("title"),
        summary: form.text("summary"),
        content: form.text("content"),
        author: form.text("author"),
        category: form.parse("category")?,
        is_published: form.flag("isPublished")?,
        publish_date: form.parse("publishDate")?,
        image: None,
    })
}

/// GET /api/news?category=&limit=
pub async fn list_news(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> Result<Json<ApiResponse<Vec<News>>>, AppError> {
    let news = state.news_service.list(query.into_filter()?).await?;
    Ok(Json(ApiResponse::list(news)))
}

/// GET /api/news/{id}
pub async fn get_news(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<News>>, AppError> {
    Ok(Json(ApiResponse::ok(state.news_service.get(id).await?)))
}

/// POST /api/news (multipart)
pub async fn create_news(
    State(state): State<AppState>,
    auth: AuthUser,
    mut form: MultipartForm,
) -> Result<(StatusCode, Json<ApiResponse<News>>), AppError> {
    let draft = new_news(&form)?;
    let image = form.take_file(IMAGE_FIELD);
    let news = state.news_service.create(&auth, draft, image).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(news))))
}

/// PUT /api/news/{id} (multipart)
pub async fn update_news(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    mut form: MultipartForm,
) -> Result<Json<ApiResponse<News>>, AppError> {
    let patch = news_patch(&form)?;
    let image = form.take_file(IMAGE_FIELD);
    let news = state.news_service.update(&auth, id, patch, image).await?;
    Ok(Json(ApiResponse::ok(news)))
}

/// DELETE /api/news/{id}
pub async fn delete_news(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.news_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("News article deleted"))))
}
