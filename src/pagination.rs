/// Cursor-based feed pagination
///
/// The feed pages with a strict cursor (the `created_at` of the last returned
/// item) rather than an offset, so new posts arriving between page fetches
/// cannot cause skips or duplicates. Queries fetch `limit + 1` rows; this
/// module turns that over-fetched batch into a page.
use chrono::{DateTime, Utc};

/// Page size applied when the client omits `limit`.
pub const DEFAULT_FEED_LIMIT: i64 = 20;

/// Server-enforced upper bound on `limit`. Client input is never trusted to
/// size a query unbounded.
pub const MAX_FEED_LIMIT: i64 = 100;

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone)]
pub struct CursorPage<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<DateTime<Utc>>,
    pub has_more: bool,
}

/// Normalise a client-supplied limit: missing or non-positive values fall
/// back to `default`, anything above `max` is clamped.
pub fn clamp_limit(requested: Option<i64>, default: i64, max: i64) -> i64 {
    match requested {
        Some(limit) if limit > 0 => limit.min(max),
        _ => default,
    }
}

/// Assemble a page from rows fetched with `LIMIT limit + 1`.
///
/// The extra row only signals that a further page exists and is discarded.
/// `next_cursor` is the sort key of the last *returned* item, and only when
/// a further page exists.
pub fn paginate<T, F>(mut rows: Vec<T>, limit: i64, cursor_of: F) -> CursorPage<T>
where
    F: Fn(&T) -> DateTime<Utc>,
{
    let has_more = rows.len() as i64 > limit;
    if has_more {
        rows.truncate(limit as usize);
    }

    let next_cursor = if has_more {
        rows.last().map(&cursor_of)
    } else {
        None
    };

    CursorPage {
        items: rows,
        next_cursor,
        has_more,
    }
}
