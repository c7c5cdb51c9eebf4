/// Business logic layer
///
/// Each service orchestrates the same sequence per operation: load the
/// entity's head (existence), run the policy check, perform the mutation or
/// read, and hand fully loaded rows to the response formatter.
pub mod comments;
pub mod posts;
pub mod replies;

pub use comments::CommentService;
pub use posts::PostService;
pub use replies::ReplyService;

use crate::db::{like_repo, LikeTarget};
use crate::dto::ToggleLikeDto;
use crate::error::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// Storage contract the like toggle runs against. `insert_like` reports
/// whether a row was actually inserted; a concurrent duplicate insert comes
/// back as `false` rather than an error.
pub(crate) trait LikeStore {
    async fn like_exists(&self, target: LikeTarget, target_id: Uuid, user_id: Uuid)
        -> Result<bool>;
    async fn insert_like(&self, target: LikeTarget, target_id: Uuid, user_id: Uuid)
        -> Result<bool>;
    async fn remove_like(&self, target: LikeTarget, target_id: Uuid, user_id: Uuid)
        -> Result<bool>;
}

impl LikeStore for PgPool {
    async fn like_exists(
        &self,
        target: LikeTarget,
        target_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool> {
        Ok(like_repo::like_exists(self, target, target_id, user_id).await?)
    }

    async fn insert_like(
        &self,
        target: LikeTarget,
        target_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool> {
        Ok(like_repo::insert_like(self, target, target_id, user_id).await?)
    }

    async fn remove_like(
        &self,
        target: LikeTarget,
        target_id: Uuid,
        user_id: Uuid,
    ) -> Result<bool> {
        Ok(like_repo::remove_like(self, target, target_id, user_id).await?)
    }
}

/// Flip the presence of a like on an already-authorized target.
///
/// Two concurrent toggles can both observe "absent"; the composite unique
/// constraint lets only one insert land and the loser's conflict is absorbed
/// as "already liked", so the caller always gets an idempotent answer.
pub(crate) async fn toggle_like_on<S: LikeStore>(
    store: &S,
    target: LikeTarget,
    target_id: Uuid,
    user_id: Uuid,
) -> Result<ToggleLikeDto> {
    if store.like_exists(target, target_id, user_id).await? {
        store.remove_like(target, target_id, user_id).await?;
        Ok(ToggleLikeDto {
            liked: false,
            message: format!("{} unliked", target.label()),
        })
    } else {
        store.insert_like(target, target_id, user_id).await?;
        Ok(ToggleLikeDto {
            liked: true,
            message: format!("{} liked", target.label()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryLikes {
        rows: Mutex<HashSet<(LikeTarget, Uuid, Uuid)>>,
        // When set, inserts report an already-present row, as the loser of a
        // concurrent toggle would see.
        lose_insert_race: bool,
    }

    impl LikeStore for MemoryLikes {
        async fn like_exists(
            &self,
            target: LikeTarget,
            target_id: Uuid,
            user_id: Uuid,
        ) -> Result<bool> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .contains(&(target, target_id, user_id)))
        }

        async fn insert_like(
            &self,
            target: LikeTarget,
            target_id: Uuid,
            user_id: Uuid,
        ) -> Result<bool> {
            if self.lose_insert_race {
                return Ok(false);
            }
            Ok(self
                .rows
                .lock()
                .unwrap()
                .insert((target, target_id, user_id)))
        }

        async fn remove_like(
            &self,
            target: LikeTarget,
            target_id: Uuid,
            user_id: Uuid,
        ) -> Result<bool> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .remove(&(target, target_id, user_id)))
        }
    }

    #[tokio::test]
    async fn toggling_twice_restores_the_original_state() {
        let store = MemoryLikes::default();
        let post_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        let first = toggle_like_on(&store, LikeTarget::Post, post_id, user_id)
            .await
            .unwrap();
        assert!(first.liked);
        assert_eq!(first.message, "Post liked");
        assert!(store
            .like_exists(LikeTarget::Post, post_id, user_id)
            .await
            .unwrap());

        let second = toggle_like_on(&store, LikeTarget::Post, post_id, user_id)
            .await
            .unwrap();
        assert!(!second.liked);
        assert_eq!(second.message, "Post unliked");
        assert!(!store
            .like_exists(LikeTarget::Post, post_id, user_id)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn toggle_does_not_touch_other_users_or_targets() {
        let store = MemoryLikes::default();
        let target_id = Uuid::new_v4();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        toggle_like_on(&store, LikeTarget::Comment, target_id, alice)
            .await
            .unwrap();
        toggle_like_on(&store, LikeTarget::Comment, target_id, bob)
            .await
            .unwrap();

        // Alice toggling off leaves Bob's like, and the same id on another
        // target kind, alone.
        toggle_like_on(&store, LikeTarget::Reply, target_id, alice)
            .await
            .unwrap();
        toggle_like_on(&store, LikeTarget::Comment, target_id, alice)
            .await
            .unwrap();

        assert!(!store
            .like_exists(LikeTarget::Comment, target_id, alice)
            .await
            .unwrap());
        assert!(store
            .like_exists(LikeTarget::Comment, target_id, bob)
            .await
            .unwrap());
        assert!(store
            .like_exists(LikeTarget::Reply, target_id, alice)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn lost_insert_race_still_reports_liked() {
        let store = MemoryLikes {
            lose_insert_race: true,
            ..Default::default()
        };
        let comment_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        // The row landed via a concurrent request between the existence probe
        // and the insert; the outcome is still a successful like.
        let result = toggle_like_on(&store, LikeTarget::Comment, comment_id, user_id)
            .await
            .unwrap();
        assert!(result.liked);
        assert_eq!(result.message, "Comment liked");
    }
}
