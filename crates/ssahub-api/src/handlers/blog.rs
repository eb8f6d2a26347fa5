//! Blog handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use ssahub_core::error::AppError;
use ssahub_entity::blog::{Blog, BlogCategory, BlogPatch, NewBlog, parse_tags};

use crate::dto::request::{BlogQuery, LimitQuery};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::extractors::{AuthUser, MultipartForm};
use crate::state::AppState;

const IMAGE_FIELD: &str = "image";
const DEFAULT_READING_TIME: i32 = 5;

fn new_blog(form: &MultipartForm) -> Result<NewBlog, AppError> {
    Ok(NewBlog {
        title: form.require("title")?,
        content: form.require("content")?,
        summary: form.require("summary")?,
        author: form.require("author")?,
        category: form
            .parse::<BlogCategory>("category")?
            .unwrap_or(BlogCategory::General),
        tags: form.text("tags").map(|t| parse_tags(&t)).unwrap_or_default(),
        reading_time: form.parse("readingTime")?.unwrap_or(DEFAULT_READING_TIME),
        is_published: form.flag("isPublished")?.unwrap_or(true),
        image: String::new(),
    })
}

fn blog_patch(form: &MultipartForm) -> Result<BlogPatch, AppError> {
    Ok(BlogPatch {
        title: form.text("title"),
        content: form.text("content"),
        summary: form.text("summary"),
        author: form.text("author"),
        category: form.parse("category")?,
        tags: form.text("tags").map(|t| parse_tags(&t)),
        reading_time: form.parse("readingTime")?,
        is_published: form.flag("isPublished")?,
        image: None,
    })
}

/// GET /api/blogs?category=&tag=&search=&published=
pub async fn list_blogs(
    State(state): State<AppState>,
    auth: Option<AuthUser>,
    Query(query): Query<BlogQuery>,
) -> Result<Json<ApiResponse<Vec<Blog>>>, AppError> {
    let viewer = auth.as_ref().map(AuthUser::context);
    let blogs = state.blog_service.list(viewer, query.into_filter()?).await?;
    Ok(Json(ApiResponse::list(blogs)))
}

/// GET /api/blogs/featured/popular
pub async fn popular_blogs(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<ApiResponse<Vec<Blog>>>, AppError> {
    Ok(Json(ApiResponse::list(
        state.blog_service.popular(query.limit).await?,
    )))
}

/// GET /api/blogs/featured/recent
pub async fn recent_blogs(
    State(state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<ApiResponse<Vec<Blog>>>, AppError> {
    Ok(Json(ApiResponse::list(
        state.blog_service.recent(query.limit).await?,
    )))
}

/// GET /api/blogs/{id}, counted as a view
pub async fn get_blog(
    State(state): State<AppState>,
    auth: Option<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Blog>>, AppError> {
    let viewer = auth.as_ref().map(AuthUser::context);
    Ok(Json(ApiResponse::ok(state.blog_service.view(viewer, id).await?)))
}

/// POST /api/blogs/{id}/like
pub async fn like_blog(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Blog>>, AppError> {
    Ok(Json(ApiResponse::ok(state.blog_service.like(id).await?)))
}

/// POST /api/blogs (multipart)
pub async fn create_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    mut form: MultipartForm,
) -> Result<(StatusCode, Json<ApiResponse<Blog>>), AppError> {
    let draft = new_blog(&form)?;
    let image = form.take_file(IMAGE_FIELD);
    let blog = state.blog_service.create(&auth, draft, image).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(blog))))
}

/// PUT /api/blogs/{id} (multipart)
pub async fn update_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    mut form: MultipartForm,
) -> Result<Json<ApiResponse<Blog>>, AppError> {
    let patch = blog_patch(&form)?;
    let image = form.take_file(IMAGE_FIELD);
    let blog = state.blog_service.update(&auth, id, patch, image).await?;
    Ok(Json(ApiResponse::ok(blog)))
}

/// DELETE /api/blogs/{id}: hard delete
pub async fn delete_blog(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    state.blog_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Blog post deleted"))))
}
