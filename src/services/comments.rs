/// Comment service - creation, listing, update, moderation, likes
///
/// Comments inherit visibility from their parent post; deletion additionally
/// grants the post owner a moderation right over comments on their post.
use crate::db::{comment_repo, like_repo, post_repo, LikeTarget};
use crate::dto::{CommentDto, LikeDto, ToggleLikeDto};
use crate::error::{AppError, Result};
use crate::policy::{self, AncestorChain};
use sqlx::PgPool;
use uuid::Uuid;

pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a comment under a post the user can see
    pub async fn create_comment(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        content: &str,
    ) -> Result<CommentDto> {
        let post = post_repo::find_post_head(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        policy::ensure_post_visible(&post, user_id)?;

        let comment_id = comment_repo::create_comment(&self.pool, post_id, user_id, content).await?;

        let row = comment_repo::find_comment_with_meta(&self.pool, comment_id, user_id)
            .await?
            .ok_or_else(|| AppError::Internal("comment row missing after insert".to_string()))?;

        Ok(CommentDto::from_row(row))
    }

    /// All comments on a post the user can see, newest first
    pub async fn get_comments_for_post(
        &self,
        post_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<CommentDto>> {
        let post = post_repo::find_post_head(&self.pool, post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        policy::ensure_post_visible(&post, user_id)?;

        let rows = comment_repo::comments_for_post(&self.pool, post_id, user_id).await?;
        Ok(rows.into_iter().map(CommentDto::from_row).collect())
    }

    /// Edit a comment; author only
    pub async fn update_comment(
        &self,
        comment_id: Uuid,
        user_id: Uuid,
        content: &str,
    ) -> Result<CommentDto> {
        let head = comment_repo::find_comment_head(&self.pool, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

        policy::ensure_owner(head.author_id, user_id)?;

        comment_repo::update_comment(&self.pool, comment_id, content).await?;

        let row = comment_repo::find_comment_with_meta(&self.pool, comment_id, user_id)
            .await?
            .ok_or_else(|| AppError::Internal("comment row missing after update".to_string()))?;

        Ok(CommentDto::from_row(row))
    }

    /// Delete a comment; the author or the post owner may do this
    pub async fn delete_comment(&self, comment_id: Uuid, user_id: Uuid) -> Result<()> {
        let head = comment_repo::find_comment_head(&self.pool, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

        let chain = AncestorChain::for_comment(&head);
        policy::ensure_chain_moderator(&chain, user_id)?;

        comment_repo::delete_comment(&self.pool, comment_id).await?;

        Ok(())
    }

    /// Toggle the user's like; requires read access to the root post
    pub async fn toggle_like(&self, comment_id: Uuid, user_id: Uuid) -> Result<ToggleLikeDto> {
        let head = comment_repo::find_comment_head(&self.pool, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

        let chain = AncestorChain::for_comment(&head);
        policy::ensure_chain_readable(&chain, user_id)?;

        super::toggle_like_on(&self.pool, LikeTarget::Comment, comment_id, user_id).await
    }

    /// List likes on a comment the user can see, newest first
    pub async fn get_likes(&self, comment_id: Uuid, user_id: Uuid) -> Result<Vec<LikeDto>> {
        let head = comment_repo::find_comment_head(&self.pool, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

        let chain = AncestorChain::for_comment(&head);
        policy::ensure_chain_readable(&chain, user_id)?;

        let likes =
            like_repo::likes_for_target(&self.pool, LikeTarget::Comment, comment_id).await?;
        Ok(likes.into_iter().map(LikeDto::from_row).collect())
    }
}
