/// Like storage shared by the three parallel variants
///
/// Posts, comments, and replies each have their own like table with a
/// composite uniqueness constraint on (target, user). The SQL shape is
/// identical across the three, so one repository is parameterised by the
/// target kind rather than duplicated per entity.
use crate::models::LikeWithUser;
use sqlx::PgPool;
use uuid::Uuid;

/// Which entity a like attaches to. Maps to the table and target column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LikeTarget {
    Post,
    Comment,
    Reply,
}

impl LikeTarget {
    fn table(&self) -> &'static str {
        match self {
            LikeTarget::Post => "post_likes",
            LikeTarget::Comment => "comment_likes",
            LikeTarget::Reply => "reply_likes",
        }
    }

    fn target_column(&self) -> &'static str {
        match self {
            LikeTarget::Post => "post_id",
            LikeTarget::Comment => "comment_id",
            LikeTarget::Reply => "reply_id",
        }
    }

    /// Entity label used in toggle messages ("Post liked", ...)
    pub fn label(&self) -> &'static str {
        match self {
            LikeTarget::Post => "Post",
            LikeTarget::Comment => "Comment",
            LikeTarget::Reply => "Reply",
        }
    }
}

/// Check whether the (target, user) like row exists
pub async fn like_exists(
    pool: &PgPool,
    target: LikeTarget,
    target_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let query = format!(
        "SELECT EXISTS(SELECT 1 FROM {table} WHERE {column} = $1 AND user_id = $2)",
        table = target.table(),
        column = target.target_column(),
    );

    let exists: bool = sqlx::query_scalar(&query)
        .bind(target_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    Ok(exists)
}

/// Insert a like. Returns false when the row already existed; the composite
/// uniqueness constraint absorbs the toggle race, and a concurrent duplicate
/// insert is reported as "already liked" instead of an error.
pub async fn insert_like(
    pool: &PgPool,
    target: LikeTarget,
    target_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let query = format!(
        r#"
        INSERT INTO {table} ({column}, user_id)
        VALUES ($1, $2)
        ON CONFLICT ({column}, user_id) DO NOTHING
        "#,
        table = target.table(),
        column = target.target_column(),
    );

    let result = sqlx::query(&query)
        .bind(target_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Remove a like. Returns false when there was nothing to remove.
pub async fn remove_like(
    pool: &PgPool,
    target: LikeTarget,
    target_id: Uuid,
    user_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let query = format!(
        "DELETE FROM {table} WHERE {column} = $1 AND user_id = $2",
        table = target.table(),
        column = target.target_column(),
    );

    let result = sqlx::query(&query)
        .bind(target_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// All likes on a target with the liking users, newest first
pub async fn likes_for_target(
    pool: &PgPool,
    target: LikeTarget,
    target_id: Uuid,
) -> Result<Vec<LikeWithUser>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT l.id, l.user_id, u.full_name AS user_full_name, u.email AS user_email, l.created_at
        FROM {table} l
        JOIN users u ON u.id = l.user_id
        WHERE l.{column} = $1
        ORDER BY l.created_at DESC
        "#,
        table = target.table(),
        column = target.target_column(),
    );

    let likes = sqlx::query_as::<_, LikeWithUser>(&query)
        .bind(target_id)
        .fetch_all(pool)
        .await?;

    Ok(likes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_map_to_distinct_tables() {
        assert_eq!(LikeTarget::Post.table(), "post_likes");
        assert_eq!(LikeTarget::Comment.table(), "comment_likes");
        assert_eq!(LikeTarget::Reply.table(), "reply_likes");
        assert_eq!(LikeTarget::Post.target_column(), "post_id");
        assert_eq!(LikeTarget::Comment.target_column(), "comment_id");
        assert_eq!(LikeTarget::Reply.target_column(), "reply_id");
    }
}
