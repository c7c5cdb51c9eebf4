/// Post service - creation, feed, retrieval, update, deletion, likes
use crate::db::{like_repo, post_repo, LikeTarget};
use crate::dto::{FeedDto, LikeDto, PostDto, ToggleLikeDto};
use crate::error::{AppError, Result};
use crate::models::PostHead;
use crate::pagination;
use crate::policy;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a post and return it fully formatted
    pub async fn create_post(
        &self,
        user_id: Uuid,
        content: &str,
        image_url: Option<&str>,
        is_private: bool,
    ) -> Result<PostDto> {
        let post_id =
            post_repo::create_post(&self.pool, user_id, content, image_url, is_private).await?;

        let row = post_repo::find_post_with_meta(&self.pool, post_id, user_id)
            .await?
            .ok_or_else(|| AppError::Internal("post row missing after insert".to_string()))?;

        Ok(PostDto::from_row(row))
    }

    /// Cursor-paginated feed of posts visible to the user
    pub async fn get_feed(
        &self,
        user_id: Uuid,
        cursor: Option<&str>,
        limit: i64,
    ) -> Result<FeedDto> {
        let cursor = parse_cursor(cursor)?;

        let rows = post_repo::feed_page(&self.pool, user_id, cursor, limit + 1).await?;
        let page = pagination::paginate(rows, limit, |row| row.created_at);

        Ok(FeedDto::from_page(page))
    }

    /// Fetch a single post, enforcing visibility
    pub async fn get_post(&self, post_id: Uuid, user_id: Uuid) -> Result<PostDto> {
        let row = post_repo::find_post_with_meta(&self.pool, post_id, user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        policy::ensure_post_visible(
            &PostHead {
                id: row.id,
                author_id: row.author_id,
                is_private: row.is_private,
            },
            user_id,
        )?;

        Ok(PostDto::from_row(row))
    }

    /// Update content and/or visibility; owner only
    pub async fn update_post(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        content: Option<&str>,
        is_private: Option<bool>,
    ) -> Result<PostDto> {
        let head = post_repo::find_post_head(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        policy::ensure_owner(head.author_id, user_id)?;

        post_repo::update_post(&self.pool, post_id, content, is_private).await?;

        let row = post_repo::find_post_with_meta(&self.pool, post_id, user_id)
            .await?
            .ok_or_else(|| AppError::Internal("post row missing after update".to_string()))?;

        Ok(PostDto::from_row(row))
    }

    /// Delete a post; owner only. Cascades take comments, replies, likes.
    pub async fn delete_post(&self, post_id: Uuid, user_id: Uuid) -> Result<()> {
        let head = post_repo::find_post_head(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        policy::ensure_owner(head.author_id, user_id)?;

        post_repo::delete_post(&self.pool, post_id).await?;

        Ok(())
    }

    /// Toggle the user's like on a post they can see
    pub async fn toggle_like(&self, post_id: Uuid, user_id: Uuid) -> Result<ToggleLikeDto> {
        let head = post_repo::find_post_head(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        policy::ensure_post_visible(&head, user_id)?;

        super::toggle_like_on(&self.pool, LikeTarget::Post, post_id, user_id).await
    }

    /// List likes on a post the user can see, newest first
    pub async fn get_likes(&self, post_id: Uuid, user_id: Uuid) -> Result<Vec<LikeDto>> {
        let head = post_repo::find_post_head(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        policy::ensure_post_visible(&head, user_id)?;

        let likes = like_repo::likes_for_target(&self.pool, LikeTarget::Post, post_id).await?;
        Ok(likes.into_iter().map(LikeDto::from_row).collect())
    }
}

fn parse_cursor(cursor: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    match cursor {
        None => Ok(None),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| AppError::validation("Invalid cursor: expected an RFC3339 timestamp")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_parsing_accepts_rfc3339_and_rejects_garbage() {
        assert_eq!(parse_cursor(None).unwrap(), None);

        let parsed = parse_cursor(Some("2024-05-01T12:00:00Z")).unwrap();
        assert!(parsed.is_some());

        let offset = parse_cursor(Some("2024-05-01T12:00:00+02:00")).unwrap().unwrap();
        assert_eq!(offset.to_rfc3339(), "2024-05-01T10:00:00+00:00");

        assert!(matches!(
            parse_cursor(Some("yesterday")),
            Err(AppError::ValidationError { .. })
        ));
    }
}
