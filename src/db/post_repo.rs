use crate::models::{PostHead, PostWithMeta};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Shared projection for fully loaded post rows: entity + author + aggregate
/// counts + the viewer-scoped like probe. `$VIEWER` is substituted with the
/// positional parameter of the requesting user in each query.
fn post_meta_columns(viewer_param: &str) -> String {
    format!(
        r#"
        p.id, p.author_id, p.content, p.image_url, p.is_private, p.created_at, p.updated_at,
        u.full_name AS author_full_name, u.email AS author_email,
        (SELECT COUNT(*) FROM post_likes pl WHERE pl.post_id = p.id) AS likes_count,
        (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comments_count,
        EXISTS(
            SELECT 1 FROM post_likes pl WHERE pl.post_id = p.id AND pl.user_id = {viewer}
        ) AS viewer_has_liked
        "#,
        viewer = viewer_param
    )
}

/// Create a post and return its id
pub async fn create_post(
    pool: &PgPool,
    author_id: Uuid,
    content: &str,
    image_url: Option<&str>,
    is_private: bool,
) -> Result<Uuid, sqlx::Error> {
    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO posts (author_id, content, image_url, is_private)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(author_id)
    .bind(content)
    .bind(image_url)
    .bind(is_private)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Minimal post projection for existence and permission checks
pub async fn find_post_head(pool: &PgPool, post_id: Uuid) -> Result<Option<PostHead>, sqlx::Error> {
    let head = sqlx::query_as::<_, PostHead>(
        r#"
        SELECT id, author_id, is_private
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(head)
}

/// Fully loaded post aggregate, scoped to the viewer for the like probe
pub async fn find_post_with_meta(
    pool: &PgPool,
    post_id: Uuid,
    viewer_id: Uuid,
) -> Result<Option<PostWithMeta>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT {columns}
        FROM posts p
        JOIN users u ON u.id = p.author_id
        WHERE p.id = $1
        "#,
        columns = post_meta_columns("$2")
    );

    let post = sqlx::query_as::<_, PostWithMeta>(&query)
        .bind(post_id)
        .bind(viewer_id)
        .fetch_optional(pool)
        .await?;

    Ok(post)
}

/// One over-fetched batch of the feed.
///
/// Eligibility: public posts plus the viewer's own private posts. The cursor
/// is strict (`created_at < cursor`) and ordering is deterministic under
/// equal timestamps via the id tiebreak. Callers pass `limit + 1` as
/// `fetch_count` and let the paginator trim the batch.
pub async fn feed_page(
    pool: &PgPool,
    viewer_id: Uuid,
    cursor: Option<DateTime<Utc>>,
    fetch_count: i64,
) -> Result<Vec<PostWithMeta>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT {columns}
        FROM posts p
        JOIN users u ON u.id = p.author_id
        WHERE (NOT p.is_private OR p.author_id = $1)
          AND ($2::timestamptz IS NULL OR p.created_at < $2)
        ORDER BY p.created_at DESC, p.id DESC
        LIMIT $3
        "#,
        columns = post_meta_columns("$1")
    );

    let posts = sqlx::query_as::<_, PostWithMeta>(&query)
        .bind(viewer_id)
        .bind(cursor)
        .bind(fetch_count)
        .fetch_all(pool)
        .await?;

    Ok(posts)
}

/// Partial update of content and/or visibility
pub async fn update_post(
    pool: &PgPool,
    post_id: Uuid,
    content: Option<&str>,
    is_private: Option<bool>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE posts
        SET content = COALESCE($2, content),
            is_private = COALESCE($3, is_private),
            updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .bind(content)
    .bind(is_private)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a post; comments, replies, and likes go with it via cascades
pub async fn delete_post(pool: &PgPool, post_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(post_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
