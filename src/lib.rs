/// Pulse Service Library
///
/// Social-feed backend: posts, comments, replies, and likes over PostgreSQL,
/// with a visibility policy (private posts, ancestor-chain moderation) and a
/// cursor-paginated feed.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and request/response envelopes
/// - `services`: Business logic layer per entity
/// - `db`: Store gateway (typed SQLx repositories)
/// - `models`: Typed rows crossing the store boundary
/// - `policy`: Visibility and ownership/moderation rules
/// - `pagination`: Cursor-page assembly
/// - `dto`: Public response shapes (the formatting layer)
/// - `middleware`: JWT authentication
/// - `error`: Error types and HTTP mapping
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod policy;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
