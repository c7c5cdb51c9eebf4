/// Authorization and visibility policy for pulse-service
///
/// Centralises every read/write permission rule so the per-entity services do
/// not repeat author comparisons. Existence is always checked before any of
/// these run: a missing entity is a `NotFound`, never a `Forbidden`, so the
/// error kind never leaks more than the entity's existence.
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{CommentHead, PostHead, ReplyHead};

/// A private post is visible only to its author; a public post is visible to
/// every authenticated user.
pub fn can_read_post(post_author_id: Uuid, is_private: bool, user_id: Uuid) -> bool {
    !is_private || post_author_id == user_id
}

/// Reject with `Forbidden` when the post is not visible to the user.
pub fn ensure_post_visible(post: &PostHead, user_id: Uuid) -> Result<()> {
    if can_read_post(post.author_id, post.is_private, user_id) {
        Ok(())
    } else {
        Err(AppError::Forbidden("Access denied".to_string()))
    }
}

/// Reject with `Forbidden` unless the user authored the entity. Used for post
/// update/delete and for comment/reply edits.
pub fn ensure_owner(author_id: Uuid, user_id: Uuid) -> Result<()> {
    if author_id == user_id {
        Ok(())
    } else {
        Err(AppError::Forbidden("Unauthorized".to_string()))
    }
}

/// The post -> comment -> reply containment hierarchy, flattened to the data
/// permission checks need. Visibility is inherited from the root post;
/// moderation rights accrue to every author along the chain.
#[derive(Debug, Clone, Copy)]
pub struct AncestorChain {
    pub post_author_id: Uuid,
    pub post_is_private: bool,
    pub comment_author_id: Option<Uuid>,
    pub reply_author_id: Option<Uuid>,
}

impl AncestorChain {
    pub fn for_post(post: &PostHead) -> Self {
        Self {
            post_author_id: post.author_id,
            post_is_private: post.is_private,
            comment_author_id: None,
            reply_author_id: None,
        }
    }

    pub fn for_comment(comment: &CommentHead) -> Self {
        Self {
            post_author_id: comment.post_author_id,
            post_is_private: comment.post_is_private,
            comment_author_id: Some(comment.author_id),
            reply_author_id: None,
        }
    }

    pub fn for_reply(reply: &ReplyHead) -> Self {
        Self {
            post_author_id: reply.post_author_id,
            post_is_private: reply.post_is_private,
            comment_author_id: Some(reply.comment_author_id),
            reply_author_id: Some(reply.author_id),
        }
    }

    /// Read access follows the root post alone.
    pub fn can_read(&self, user_id: Uuid) -> bool {
        can_read_post(self.post_author_id, self.post_is_private, user_id)
    }

    /// Moderation (deletion) is allowed for any author along the chain: a
    /// post owner may remove comments and replies under their post, a comment
    /// author may remove replies under their comment.
    pub fn can_moderate(&self, user_id: Uuid) -> bool {
        self.reply_author_id == Some(user_id)
            || self.comment_author_id == Some(user_id)
            || self.post_author_id == user_id
    }
}

/// Reject with `Forbidden` when the chain's root post is not visible.
pub fn ensure_chain_readable(chain: &AncestorChain, user_id: Uuid) -> Result<()> {
    if chain.can_read(user_id) {
        Ok(())
    } else {
        Err(AppError::Forbidden("Access denied".to_string()))
    }
}

/// Reject with `Forbidden` when the user holds no moderation right anywhere
/// along the chain.
pub fn ensure_chain_moderator(chain: &AncestorChain, user_id: Uuid) -> Result<()> {
    if chain.can_moderate(user_id) {
        Ok(())
    } else {
        Err(AppError::Forbidden("Unauthorized".to_string()))
    }
}
