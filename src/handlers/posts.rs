/// Post handlers - HTTP endpoints for post operations
use crate::config::Config;
use crate::error::Result;
use crate::middleware::UserId;
use crate::pagination;
use crate::services::PostService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 5000, message = "Content is required (max 5000 characters)"))]
    pub content: String,
    /// Opaque URL produced by the upload pipeline; stored as-is.
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_private: bool,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 5000, message = "Content is required (max 5000 characters)"))]
    pub content: Option<String>,
    pub is_private: Option<bool>,
}

/// Feed query parameters: opaque RFC3339 cursor plus an optional page size
#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub cursor: Option<String>,
    pub limit: Option<i64>,
}

/// Create a new post
pub async fn create_post(
    pool: web::Data<PgPool>,
    user_id: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = PostService::new((**pool).clone());
    let post = service
        .create_post(
            user_id.0,
            &req.content,
            req.image_url.as_deref(),
            req.is_private,
        )
        .await?;

    Ok(super::ok("post created successfully", post))
}

/// Cursor-paginated feed
pub async fn get_feed(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    user_id: UserId,
    query: web::Query<FeedQuery>,
) -> Result<HttpResponse> {
    let limit = pagination::clamp_limit(
        query.limit,
        config.feed.default_limit,
        config.feed.max_limit,
    );

    let service = PostService::new((**pool).clone());
    let feed = service
        .get_feed(user_id.0, query.cursor.as_deref(), limit)
        .await?;

    Ok(super::ok("post feed fetched successfully", feed))
}

/// Get a post by ID
pub async fn get_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let post = service.get_post(*post_id, user_id.0).await?;

    Ok(super::ok("single post fetched successfully", post))
}

/// Update a post's content and/or visibility
pub async fn update_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user_id: UserId,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = PostService::new((**pool).clone());
    let post = service
        .update_post(
            *post_id,
            user_id.0,
            req.content.as_deref(),
            req.is_private,
        )
        .await?;

    Ok(super::ok("post updated successfully", post))
}

/// Delete a post
pub async fn delete_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    service.delete_post(*post_id, user_id.0).await?;

    Ok(super::ok(
        "post deleted successfully",
        serde_json::Value::Null,
    ))
}

/// Toggle the caller's like on a post
pub async fn toggle_like(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let result = service.toggle_like(*post_id, user_id.0).await?;

    Ok(super::ok_data(result))
}

/// List likes on a post
pub async fn get_likes(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let likes = service.get_likes(*post_id, user_id.0).await?;

    Ok(super::ok("post likes fetched successfully", likes))
}
