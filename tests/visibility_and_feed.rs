//! End-to-end checks of the pure core: visibility policy, ancestor-chain
//! moderation, and cursor-paginated feed assembly feeding the formatter.

use chrono::{DateTime, TimeZone, Utc};
use pulse_service::dto::{FeedDto, PostDto};
use pulse_service::models::{CommentHead, PostHead, PostWithMeta, ReplyHead};
use pulse_service::pagination::{clamp_limit, paginate};
use pulse_service::policy::{can_read_post, AncestorChain};
use uuid::Uuid;

fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

fn post_row(author_id: Uuid, created_at: DateTime<Utc>, is_private: bool) -> PostWithMeta {
    PostWithMeta {
        id: Uuid::new_v4(),
        author_id,
        content: "post".to_string(),
        image_url: None,
        is_private,
        created_at,
        updated_at: created_at,
        author_full_name: "Some User".to_string(),
        author_email: "user@example.com".to_string(),
        likes_count: 0,
        comments_count: 0,
        viewer_has_liked: false,
    }
}

/// Mimics the store's feed query: eligibility filter, strict cursor,
/// descending order, limit + 1 fetch.
fn fetch_feed(
    all: &[PostWithMeta],
    viewer: Uuid,
    cursor: Option<DateTime<Utc>>,
    limit: i64,
) -> Vec<PostWithMeta> {
    let mut eligible: Vec<PostWithMeta> = all
        .iter()
        .filter(|p| !p.is_private || p.author_id == viewer)
        .filter(|p| cursor.map_or(true, |c| p.created_at < c))
        .cloned()
        .collect();
    eligible.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    eligible.truncate(limit as usize + 1);
    eligible
}

#[test]
fn visibility_truth_table() {
    let author = Uuid::new_v4();
    let other = Uuid::new_v4();

    // Public posts are readable by everyone, private posts by the author only.
    assert!(can_read_post(author, false, other));
    assert!(can_read_post(author, false, author));
    assert!(can_read_post(author, true, author));
    assert!(!can_read_post(author, true, other));
}

#[test]
fn moderation_rights_accrue_along_the_chain() {
    let post_author = Uuid::new_v4();
    let comment_author = Uuid::new_v4();
    let reply_author = Uuid::new_v4();
    let bystander = Uuid::new_v4();

    let post = PostHead {
        id: Uuid::new_v4(),
        author_id: post_author,
        is_private: false,
    };
    let comment = CommentHead {
        id: Uuid::new_v4(),
        author_id: comment_author,
        post_id: post.id,
        post_author_id: post_author,
        post_is_private: false,
    };
    let reply = ReplyHead {
        id: Uuid::new_v4(),
        author_id: reply_author,
        comment_id: comment.id,
        comment_author_id: comment_author,
        post_id: post.id,
        post_author_id: post_author,
        post_is_private: false,
    };

    // A post owner moderates comments on their post even when they did not
    // write them.
    let comment_chain = AncestorChain::for_comment(&comment);
    assert!(comment_chain.can_moderate(post_author));
    assert!(comment_chain.can_moderate(comment_author));
    assert!(!comment_chain.can_moderate(bystander));

    // Replies add a third rung to the ladder.
    let reply_chain = AncestorChain::for_reply(&reply);
    assert!(reply_chain.can_moderate(reply_author));
    assert!(reply_chain.can_moderate(comment_author));
    assert!(reply_chain.can_moderate(post_author));
    assert!(!reply_chain.can_moderate(bystander));

    // Moderation rights never imply read access to a private root post.
    let private_comment = CommentHead {
        post_is_private: true,
        ..comment
    };
    let private_chain = AncestorChain::for_comment(&private_comment);
    assert!(!private_chain.can_read(comment_author));
    assert!(private_chain.can_read(post_author));
}

#[test]
fn feed_walk_covers_eligible_set_exactly_once() {
    let viewer = Uuid::new_v4();
    let stranger = Uuid::new_v4();

    let mut all = Vec::new();
    for i in 1..=9 {
        all.push(post_row(stranger, ts(i * 10), false));
    }
    // The viewer's own private posts are eligible; a stranger's are not.
    all.push(post_row(viewer, ts(95), true));
    all.push(post_row(stranger, ts(96), true));

    let limit = clamp_limit(Some(3), 20, 100);
    let mut collected: Vec<Uuid> = Vec::new();
    let mut cursor = None;
    loop {
        let batch = fetch_feed(&all, viewer, cursor, limit);
        let page = paginate(batch, limit, |p| p.created_at);
        collected.extend(page.items.iter().map(|p| p.id));

        let dto = FeedDto::from_page(page.clone());
        assert_eq!(dto.has_more, page.has_more);
        if !page.has_more {
            assert!(dto.next_cursor.is_none());
            break;
        }
        assert!(dto.next_cursor.is_some());
        cursor = page.next_cursor;
    }

    // 9 public + the viewer's private post; the stranger's private post never
    // appears.
    assert_eq!(collected.len(), 10);
    let unique: std::collections::HashSet<_> = collected.iter().collect();
    assert_eq!(unique.len(), collected.len());

    let eligible: std::collections::HashSet<Uuid> = all
        .iter()
        .filter(|p| !p.is_private || p.author_id == viewer)
        .map(|p| p.id)
        .collect();
    assert_eq!(unique.len(), eligible.len());
}

#[test]
fn posts_arriving_between_pages_do_not_shift_later_pages() {
    let viewer = Uuid::new_v4();
    let author = Uuid::new_v4();

    let mut all: Vec<PostWithMeta> = (1..=6).map(|i| post_row(author, ts(i * 10), false)).collect();

    let limit = 3;
    let first = paginate(fetch_feed(&all, viewer, None, limit), limit, |p| p.created_at);
    assert!(first.has_more);

    // New post lands after the first page was served.
    let late_post = post_row(author, ts(1_000), false);
    let late_id = late_post.id;
    all.push(late_post);

    let second = paginate(
        fetch_feed(&all, viewer, first.next_cursor, limit),
        limit,
        |p| p.created_at,
    );

    assert!(second.items.iter().all(|p| p.id != late_id));

    let mut seen: Vec<DateTime<Utc>> = first
        .items
        .iter()
        .chain(second.items.iter())
        .map(|p| p.created_at)
        .collect();
    let mut expected: Vec<DateTime<Utc>> = (1..=6).map(|i| ts(i * 10)).collect();
    expected.reverse();
    seen.dedup();
    assert_eq!(seen, expected);
}

#[test]
fn equal_timestamps_keep_a_deterministic_order() {
    let viewer = Uuid::new_v4();
    let author = Uuid::new_v4();

    // Four posts created in the same instant.
    let all: Vec<PostWithMeta> = (0..4).map(|_| post_row(author, ts(500), false)).collect();

    let limit = 2;
    let first = fetch_feed(&all, viewer, None, limit);
    let second = fetch_feed(&all, viewer, None, limit);

    // The id tiebreak makes repeated reads agree on the order.
    let ids_a: Vec<Uuid> = first.iter().map(|p| p.id).collect();
    let ids_b: Vec<Uuid> = second.iter().map(|p| p.id).collect();
    assert_eq!(ids_a, ids_b);
}

#[test]
fn formatter_output_matches_public_contract() {
    let author = Uuid::new_v4();
    let mut row = post_row(author, ts(100), false);
    row.likes_count = 7;
    row.comments_count = 4;
    row.viewer_has_liked = true;

    let json = serde_json::to_value(PostDto::from_row(row)).unwrap();
    assert_eq!(json["likesCount"], 7);
    assert_eq!(json["commentsCount"], 4);
    assert_eq!(json["isLiked"], true);
    assert_eq!(json["author"]["email"], "user@example.com");
}
