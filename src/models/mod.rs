/// Data models for pulse-service
///
/// Typed rows returned by the store gateway. Every query in `db/` maps to one
/// of these concrete shapes; nothing dynamically typed crosses the boundary.
///
/// Two families of rows exist:
/// - `*Head` rows carry just enough of an entity (and its ancestors) to run
///   existence and permission checks without loading content.
/// - `*WithMeta` rows are fully loaded aggregates: entity + author + aggregate
///   counts + the viewer-scoped like probe, ready for the response formatter.
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Minimal post projection for visibility and ownership checks.
#[derive(Debug, Clone, FromRow)]
pub struct PostHead {
    pub id: Uuid,
    pub author_id: Uuid,
    pub is_private: bool,
}

/// Comment plus the parent post fields needed for inherited visibility.
#[derive(Debug, Clone, FromRow)]
pub struct CommentHead {
    pub id: Uuid,
    pub author_id: Uuid,
    pub post_id: Uuid,
    pub post_author_id: Uuid,
    pub post_is_private: bool,
}

/// Reply plus its full ancestor chain (comment author, root post).
#[derive(Debug, Clone, FromRow)]
pub struct ReplyHead {
    pub id: Uuid,
    pub author_id: Uuid,
    pub comment_id: Uuid,
    pub comment_author_id: Uuid,
    pub post_id: Uuid,
    pub post_author_id: Uuid,
    pub post_is_private: bool,
}

/// Fully loaded post aggregate for response formatting.
#[derive(Debug, Clone, FromRow)]
pub struct PostWithMeta {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub image_url: Option<String>,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_full_name: String,
    pub author_email: String,
    pub likes_count: i64,
    pub comments_count: i64,
    pub viewer_has_liked: bool,
}

/// Fully loaded comment aggregate for response formatting.
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithMeta {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_full_name: String,
    pub author_email: String,
    pub likes_count: i64,
    pub replies_count: i64,
    pub viewer_has_liked: bool,
}

/// Fully loaded reply aggregate for response formatting.
#[derive(Debug, Clone, FromRow)]
pub struct ReplyWithMeta {
    pub id: Uuid,
    pub comment_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_full_name: String,
    pub author_email: String,
    pub likes_count: i64,
    pub viewer_has_liked: bool,
}

/// Like row joined with the liking user, for like listings.
#[derive(Debug, Clone, FromRow)]
pub struct LikeWithUser {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_full_name: String,
    pub user_email: String,
    pub created_at: DateTime<Utc>,
}
