/// Comment handlers - HTTP endpoints for comment operations
use crate::error::Result;
use crate::middleware::UserId;
use crate::services::CommentService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub post_id: Uuid,
    #[validate(length(min = 1, max = 2000, message = "Content is required (max 2000 characters)"))]
    pub content: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, max = 2000, message = "Content is required (max 2000 characters)"))]
    pub content: String,
}

/// Create a comment on a post
pub async fn create_comment(
    pool: web::Data<PgPool>,
    user_id: UserId,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = CommentService::new((**pool).clone());
    let comment = service
        .create_comment(user_id.0, req.post_id, &req.content)
        .await?;

    Ok(super::ok("comment created successfully", comment))
}

/// List comments on a post, newest first
pub async fn get_post_comments(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    let comments = service.get_comments_for_post(*post_id, user_id.0).await?;

    Ok(super::ok("comments fetched successfully", comments))
}

/// Update a comment
pub async fn update_comment(
    pool: web::Data<PgPool>,
    comment_id: web::Path<Uuid>,
    user_id: UserId,
    req: web::Json<UpdateCommentRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = CommentService::new((**pool).clone());
    let comment = service
        .update_comment(*comment_id, user_id.0, &req.content)
        .await?;

    Ok(super::ok("comment updated successfully", comment))
}

/// Delete a comment (author or post owner)
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    comment_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    service.delete_comment(*comment_id, user_id.0).await?;

    Ok(super::ok(
        "comment deleted successfully",
        serde_json::Value::Null,
    ))
}

/// Toggle the caller's like on a comment
pub async fn toggle_like(
    pool: web::Data<PgPool>,
    comment_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    let result = service.toggle_like(*comment_id, user_id.0).await?;

    Ok(super::ok_data(result))
}

/// List likes on a comment
pub async fn get_likes(
    pool: web::Data<PgPool>,
    comment_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    let likes = service.get_likes(*comment_id, user_id.0).await?;

    Ok(super::ok("comment likes fetched successfully", likes))
}
