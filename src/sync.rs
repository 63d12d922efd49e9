pub mod filter;
pub mod reader;
pub mod status_review_job;
pub mod sync_feed_job;

pub use reader::{FetchedFeed, FetchedFeedItem};
pub use status_review_job::StatusReviewJob;
pub use sync_feed_job::SyncFeedJob;

use crate::models::feed_filter::FeedFilter;

/// Trims a parsed document to the first `max_items` entries (document order,
/// newest first), applies the feed's filters, and reverses the survivors so
/// they are published oldest-first.
pub fn extract(
    fetched: FetchedFeed,
    filters: &[FeedFilter],
    max_items: usize,
) -> Vec<FetchedFeedItem> {
    let recent: Vec<FetchedFeedItem> = fetched.items.into_iter().take(max_items).collect();

    let mut kept = filter::apply_filters(recent, filters);
    kept.reverse();

    kept
}
