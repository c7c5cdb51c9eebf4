/// Public response shapes for pulse-service
///
/// Pure formatting layer: each `from_row` takes a fully loaded store row and
/// produces the camelCase JSON the API exposes. Counts always come from
/// store-side aggregates and `isLiked` from the viewer-scoped membership
/// probe; neither is ever recomputed from loaded collections here.
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{CommentWithMeta, LikeWithUser, PostWithMeta, ReplyWithMeta};
use crate::pagination::CursorPage;

/// Public author sub-object embedded in every entity response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    pub id: Uuid,
    pub content: String,
    pub image_url: Option<String>,
    pub is_private: bool,
    pub author: AuthorDto,
    pub likes_count: i64,
    pub comments_count: i64,
    pub is_liked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostDto {
    pub fn from_row(row: PostWithMeta) -> Self {
        Self {
            id: row.id,
            content: row.content,
            image_url: row.image_url,
            is_private: row.is_private,
            author: AuthorDto {
                id: row.author_id,
                full_name: row.author_full_name,
                email: row.author_email,
            },
            likes_count: row.likes_count,
            comments_count: row.comments_count,
            is_liked: row.viewer_has_liked,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: Uuid,
    pub content: String,
    pub post_id: Uuid,
    pub author: AuthorDto,
    pub likes_count: i64,
    pub replies_count: i64,
    pub is_liked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CommentDto {
    pub fn from_row(row: CommentWithMeta) -> Self {
        Self {
            id: row.id,
            content: row.content,
            post_id: row.post_id,
            author: AuthorDto {
                id: row.author_id,
                full_name: row.author_full_name,
                email: row.author_email,
            },
            likes_count: row.likes_count,
            replies_count: row.replies_count,
            is_liked: row.viewer_has_liked,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyDto {
    pub id: Uuid,
    pub content: String,
    pub comment_id: Uuid,
    pub author: AuthorDto,
    pub likes_count: i64,
    pub is_liked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReplyDto {
    pub fn from_row(row: ReplyWithMeta) -> Self {
        Self {
            id: row.id,
            content: row.content,
            comment_id: row.comment_id,
            author: AuthorDto {
                id: row.author_id,
                full_name: row.author_full_name,
                email: row.author_email,
            },
            likes_count: row.likes_count,
            is_liked: row.viewer_has_liked,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// One entry in a like listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeDto {
    pub id: Uuid,
    pub user: AuthorDto,
    pub created_at: DateTime<Utc>,
}

impl LikeDto {
    pub fn from_row(row: LikeWithUser) -> Self {
        Self {
            id: row.id,
            user: AuthorDto {
                id: row.user_id,
                full_name: row.user_full_name,
                email: row.user_email,
            },
            created_at: row.created_at,
        }
    }
}

/// Outcome of a like toggle.
#[derive(Debug, Clone, Serialize)]
pub struct ToggleLikeDto {
    pub liked: bool,
    pub message: String,
}

/// One page of the feed, cursor serialised as an RFC3339 timestamp.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedDto {
    pub posts: Vec<PostDto>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl FeedDto {
    pub fn from_page(page: CursorPage<PostWithMeta>) -> Self {
        Self {
            posts: page.items.into_iter().map(PostDto::from_row).collect(),
            next_cursor: page.next_cursor.map(|c| c.to_rfc3339()),
            has_more: page.has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_post_row(liked: bool) -> PostWithMeta {
        PostWithMeta {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            content: "hello".to_string(),
            image_url: None,
            is_private: false,
            created_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            updated_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            author_full_name: "Ada Lovelace".to_string(),
            author_email: "ada@example.com".to_string(),
            likes_count: 3,
            comments_count: 2,
            viewer_has_liked: liked,
        }
    }

    #[test]
    fn post_dto_uses_aggregate_counts_and_probe_flag() {
        let row = sample_post_row(true);
        let dto = PostDto::from_row(row.clone());
        assert_eq!(dto.likes_count, 3);
        assert_eq!(dto.comments_count, 2);
        assert!(dto.is_liked);
        assert_eq!(dto.author.id, row.author_id);
    }

    #[test]
    fn post_dto_serialises_to_camel_case() {
        let json = serde_json::to_value(PostDto::from_row(sample_post_row(false))).unwrap();
        assert!(json.get("likesCount").is_some());
        assert!(json.get("commentsCount").is_some());
        assert!(json.get("isLiked").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json["author"].get("fullName").is_some());
        // No snake_case leakage.
        assert!(json.get("likes_count").is_none());
    }

    #[test]
    fn feed_dto_carries_cursor_as_rfc3339() {
        let page = CursorPage {
            items: vec![sample_post_row(false)],
            next_cursor: Some(Utc.timestamp_opt(1_700_000_000, 0).unwrap()),
            has_more: true,
        };
        let dto = FeedDto::from_page(page);
        assert!(dto.has_more);
        assert_eq!(dto.posts.len(), 1);
        let cursor = dto.next_cursor.unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&cursor).is_ok());
    }
}
