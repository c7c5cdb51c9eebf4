/// Reply service - creation, listing, update, moderation, likes
///
/// Replies sit at the bottom of the containment hierarchy: visibility comes
/// transitively from the root post, and deletion is open to the reply author,
/// the comment author, and the post owner.
use crate::db::{comment_repo, like_repo, reply_repo, LikeTarget};
use crate::dto::{LikeDto, ReplyDto, ToggleLikeDto};
use crate::error::{AppError, Result};
use crate::policy::{self, AncestorChain};
use sqlx::PgPool;
use uuid::Uuid;

pub struct ReplyService {
    pool: PgPool,
}

impl ReplyService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a reply under a comment whose root post the user can see
    pub async fn create_reply(
        &self,
        user_id: Uuid,
        comment_id: Uuid,
        content: &str,
    ) -> Result<ReplyDto> {
        let comment = comment_repo::find_comment_head(&self.pool, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

        let chain = AncestorChain::for_comment(&comment);
        policy::ensure_chain_readable(&chain, user_id)?;

        let reply_id = reply_repo::create_reply(&self.pool, comment_id, user_id, content).await?;

        let row = reply_repo::find_reply_with_meta(&self.pool, reply_id, user_id)
            .await?
            .ok_or_else(|| AppError::Internal("reply row missing after insert".to_string()))?;

        Ok(ReplyDto::from_row(row))
    }

    /// All replies under a comment, oldest first (conversation order)
    pub async fn get_replies_for_comment(
        &self,
        comment_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<ReplyDto>> {
        let comment = comment_repo::find_comment_head(&self.pool, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))?;

        let chain = AncestorChain::for_comment(&comment);
        policy::ensure_chain_readable(&chain, user_id)?;

        let rows = reply_repo::replies_for_comment(&self.pool, comment_id, user_id).await?;
        Ok(rows.into_iter().map(ReplyDto::from_row).collect())
    }

    /// Edit a reply; author only
    pub async fn update_reply(
        &self,
        reply_id: Uuid,
        user_id: Uuid,
        content: &str,
    ) -> Result<ReplyDto> {
        let head = reply_repo::find_reply_head(&self.pool, reply_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reply not found".to_string()))?;

        policy::ensure_owner(head.author_id, user_id)?;

        reply_repo::update_reply(&self.pool, reply_id, content).await?;

        let row = reply_repo::find_reply_with_meta(&self.pool, reply_id, user_id)
            .await?
            .ok_or_else(|| AppError::Internal("reply row missing after update".to_string()))?;

        Ok(ReplyDto::from_row(row))
    }

    /// Delete a reply; the reply author, comment author, or post owner
    pub async fn delete_reply(&self, reply_id: Uuid, user_id: Uuid) -> Result<()> {
        let head = reply_repo::find_reply_head(&self.pool, reply_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reply not found".to_string()))?;

        let chain = AncestorChain::for_reply(&head);
        policy::ensure_chain_moderator(&chain, user_id)?;

        reply_repo::delete_reply(&self.pool, reply_id).await?;

        Ok(())
    }

    /// Toggle the user's like; requires read access to the root post
    pub async fn toggle_like(&self, reply_id: Uuid, user_id: Uuid) -> Result<ToggleLikeDto> {
        let head = reply_repo::find_reply_head(&self.pool, reply_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reply not found".to_string()))?;

        let chain = AncestorChain::for_reply(&head);
        policy::ensure_chain_readable(&chain, user_id)?;

        super::toggle_like_on(&self.pool, LikeTarget::Reply, reply_id, user_id).await
    }

    /// List likes on a reply the user can see, newest first
    pub async fn get_likes(&self, reply_id: Uuid, user_id: Uuid) -> Result<Vec<LikeDto>> {
        let head = reply_repo::find_reply_head(&self.pool, reply_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Reply not found".to_string()))?;

        let chain = AncestorChain::for_reply(&head);
        policy::ensure_chain_readable(&chain, user_id)?;

        let likes = like_repo::likes_for_target(&self.pool, LikeTarget::Reply, reply_id).await?;
        Ok(likes.into_iter().map(LikeDto::from_row).collect())
    }
}
