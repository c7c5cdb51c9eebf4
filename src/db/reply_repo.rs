use crate::models::{ReplyHead, ReplyWithMeta};
use sqlx::PgPool;
use uuid::Uuid;

fn reply_meta_columns(viewer_param: &str) -> String {
    format!(
        r#"
        r.id, r.comment_id, r.author_id, r.content, r.created_at, r.updated_at,
        u.full_name AS author_full_name, u.email AS author_email,
        (SELECT COUNT(*) FROM reply_likes rl WHERE rl.reply_id = r.id) AS likes_count,
        EXISTS(
            SELECT 1 FROM reply_likes rl WHERE rl.reply_id = r.id AND rl.user_id = {viewer}
        ) AS viewer_has_liked
        "#,
        viewer = viewer_param
    )
}

/// Create a reply and return its id
pub async fn create_reply(
    pool: &PgPool,
    comment_id: Uuid,
    author_id: Uuid,
    content: &str,
) -> Result<Uuid, sqlx::Error> {
    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO replies (comment_id, author_id, content)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(comment_id)
    .bind(author_id)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Reply plus its full ancestor chain in one round trip
pub async fn find_reply_head(
    pool: &PgPool,
    reply_id: Uuid,
) -> Result<Option<ReplyHead>, sqlx::Error> {
    let head = sqlx::query_as::<_, ReplyHead>(
        r#"
        SELECT r.id, r.author_id, r.comment_id,
               c.author_id AS comment_author_id,
               p.id AS post_id,
               p.author_id AS post_author_id,
               p.is_private AS post_is_private
        FROM replies r
        JOIN comments c ON c.id = r.comment_id
        JOIN posts p ON p.id = c.post_id
        WHERE r.id = $1
        "#,
    )
    .bind(reply_id)
    .fetch_optional(pool)
    .await?;

    Ok(head)
}

/// Fully loaded reply aggregate, scoped to the viewer for the like probe
pub async fn find_reply_with_meta(
    pool: &PgPool,
    reply_id: Uuid,
    viewer_id: Uuid,
) -> Result<Option<ReplyWithMeta>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT {columns}
        FROM replies r
        JOIN users u ON u.id = r.author_id
        WHERE r.id = $1
        "#,
        columns = reply_meta_columns("$2")
    );

    let reply = sqlx::query_as::<_, ReplyWithMeta>(&query)
        .bind(reply_id)
        .bind(viewer_id)
        .fetch_optional(pool)
        .await?;

    Ok(reply)
}

/// All replies under a comment, oldest first (conversation order)
pub async fn replies_for_comment(
    pool: &PgPool,
    comment_id: Uuid,
    viewer_id: Uuid,
) -> Result<Vec<ReplyWithMeta>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT {columns}
        FROM replies r
        JOIN users u ON u.id = r.author_id
        WHERE r.comment_id = $1
        ORDER BY r.created_at ASC
        "#,
        columns = reply_meta_columns("$2")
    );

    let replies = sqlx::query_as::<_, ReplyWithMeta>(&query)
        .bind(comment_id)
        .bind(viewer_id)
        .fetch_all(pool)
        .await?;

    Ok(replies)
}

/// Update reply content
pub async fn update_reply(
    pool: &PgPool,
    reply_id: Uuid,
    content: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE replies
        SET content = $2, updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(reply_id)
    .bind(content)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a reply; its likes go with it via cascades
pub async fn delete_reply(pool: &PgPool, reply_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM replies WHERE id = $1")
        .bind(reply_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
