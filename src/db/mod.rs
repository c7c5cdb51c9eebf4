/// Store gateway for pulse-service
///
/// Each repository module owns the SQL for one entity and returns the typed
/// rows defined in `models`. No permission logic lives here; services combine
/// these calls with `policy` checks.
pub mod comment_repo;
pub mod like_repo;
pub mod post_repo;
pub mod reply_repo;

pub use like_repo::LikeTarget;
