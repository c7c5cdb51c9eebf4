use crate::models::{CommentHead, CommentWithMeta};
use sqlx::PgPool;
use uuid::Uuid;

fn comment_meta_columns(viewer_param: &str) -> String {
    format!(
        r#"
        c.id, c.post_id, c.author_id, c.content, c.created_at, c.updated_at,
        u.full_name AS author_full_name, u.email AS author_email,
        (SELECT COUNT(*) FROM comment_likes cl WHERE cl.comment_id = c.id) AS likes_count,
        (SELECT COUNT(*) FROM replies r WHERE r.comment_id = c.id) AS replies_count,
        EXISTS(
            SELECT 1 FROM comment_likes cl WHERE cl.comment_id = c.id AND cl.user_id = {viewer}
        ) AS viewer_has_liked
        "#,
        viewer = viewer_param
    )
}

/// Create a comment and return its id
pub async fn create_comment(
    pool: &PgPool,
    post_id: Uuid,
    author_id: Uuid,
    content: &str,
) -> Result<Uuid, sqlx::Error> {
    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO comments (post_id, author_id, content)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(post_id)
    .bind(author_id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Comment plus the parent post fields needed for inherited visibility
pub async fn find_comment_head(
    pool: &PgPool,
    comment_id: Uuid,
) -> Result<Option<CommentHead>, sqlx::Error> {
    let head = sqlx::query_as::<_, CommentHead>(
        r#"
        SELECT c.id, c.author_id, c.post_id,
               p.author_id AS post_author_id,
               p.is_private AS post_is_private
        FROM comments c
        JOIN posts p ON p.id = c.post_id
        WHERE c.id = $1
        "#,
    )
    .bind(comment_id)
    .fetch_optional(pool)
    .await?;

    Ok(head)
}

/// Fully loaded comment aggregate, scoped to the viewer for the like probe
pub async fn find_comment_with_meta(
    pool: &PgPool,
    comment_id: Uuid,
    viewer_id: Uuid,
) -> Result<Option<CommentWithMeta>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT {columns}
        FROM comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.id = $1
        "#,
        columns = comment_meta_columns("$2")
    );

    let comment = sqlx::query_as::<_, CommentWithMeta>(&query)
        .bind(comment_id)
        .bind(viewer_id)
        .fetch_optional(pool)
        .await?;

    Ok(comment)
}

/// All comments on a post, newest first
pub async fn comments_for_post(
    pool: &PgPool,
    post_id: Uuid,
    viewer_id: Uuid,
) -> Result<Vec<CommentWithMeta>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT {columns}
        FROM comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.post_id = $1
        ORDER BY c.created_at DESC
        "#,
        columns = comment_meta_columns("$2")
    );

    let comments = sqlx::query_as::<_, CommentWithMeta>(&query)
        .bind(post_id)
        .bind(viewer_id)
        .fetch_all(pool)
        .await?;

    Ok(comments)
}

/// Update comment content
pub async fn update_comment(
    pool: &PgPool,
    comment_id: Uuid,
    content: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE comments
        SET content = $2, updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(comment_id)
    .bind(content)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a comment; replies and likes go with it via cascades
pub async fn delete_comment(pool: &PgPool, comment_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(comment_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
