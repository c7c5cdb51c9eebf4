/// Reply handlers - HTTP endpoints for reply operations
use crate::error::Result;
use crate::middleware::UserId;
use crate::services::ReplyService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReplyRequest {
    pub comment_id: Uuid,
    #[validate(length(min = 1, max = 2000, message = "Content is required (max 2000 characters)"))]
    pub content: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateReplyRequest {
    #[validate(length(min = 1, max = 2000, message = "Content is required (max 2000 characters)"))]
    pub content: String,
}

/// Create a reply under a comment
pub async fn create_reply(
    pool: web::Data<PgPool>,
    user_id: UserId,
    req: web::Json<CreateReplyRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = ReplyService::new((**pool).clone());
    let reply = service
        .create_reply(user_id.0, req.comment_id, &req.content)
        .await?;

    Ok(super::ok("reply created successfully", reply))
}

/// List replies under a comment, oldest first
pub async fn get_comment_replies(
    pool: web::Data<PgPool>,
    comment_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = ReplyService::new((**pool).clone());
    let replies = service
        .get_replies_for_comment(*comment_id, user_id.0)
        .await?;

    Ok(super::ok("replies fetched successfully", replies))
}

/// Update a reply
pub async fn update_reply(
    pool: web::Data<PgPool>,
    reply_id: web::Path<Uuid>,
    user_id: UserId,
    req: web::Json<UpdateReplyRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let service = ReplyService::new((**pool).clone());
    let reply = service
        .update_reply(*reply_id, user_id.0, &req.content)
        .await?;

    Ok(super::ok("reply updated successfully", reply))
}

/// Delete a reply (reply author, comment author, or post owner)
pub async fn delete_reply(
    pool: web::Data<PgPool>,
    reply_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = ReplyService::new((**pool).clone());
    service.delete_reply(*reply_id, user_id.0).await?;

    Ok(super::ok(
        "reply deleted successfully",
        serde_json::Value::Null,
    ))
}

/// Toggle the caller's like on a reply
pub async fn toggle_like(
    pool: web::Data<PgPool>,
    reply_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = ReplyService::new((**pool).clone());
    let result = service.toggle_like(*reply_id, user_id.0).await?;

    Ok(super::ok_data(result))
}

/// List likes on a reply
pub async fn get_likes(
    pool: web::Data<PgPool>,
    reply_id: web::Path<Uuid>,
    user_id: UserId,
) -> Result<HttpResponse> {
    let service = ReplyService::new((**pool).clone());
    let likes = service.get_likes(*reply_id, user_id.0).await?;

    Ok(super::ok("reply likes fetched successfully", likes))
}
