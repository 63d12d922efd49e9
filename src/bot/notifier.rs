use crate::bot::{ChatApi, MessageContent};
use crate::config::Config;
use crate::db::feeds;
use crate::models::feed::{Feed, FeedKind};
use diesel::PgConnection;

pub fn feed_broken(api: &dyn ChatApi, feed: &Feed) {
    let message = format!(
        "Feed {} ({}) keeps failing and was marked broken. It will not be fetched again until an operator resets it.",
        feed.name, feed.link
    );

    deliver_note(api, message);
}

pub fn channel_missing(api: &dyn ChatApi, feed: &Feed) {
    let message = format!(
        "Feed {} points at channel #{} which no longer exists.",
        feed.name, feed.channel_name
    );

    deliver_note(api, message);
}

pub fn platform_failure(api: &dyn ChatApi, feed: &Feed, error: &str) {
    let message = format!(
        "Could not publish updates of feed {} to #{}: {}",
        feed.name, feed.channel_name, error
    );

    deliver_note(api, message);
}

/// Broken feeds stay silent otherwise; this resurfaces them for manual
/// review on a slow cadence driven by the poller.
pub fn remind_broken_feeds(conn: &mut PgConnection, api: &dyn ChatApi, kind: FeedKind) {
    let broken = match feeds::list_broken_by_kind(conn, kind) {
        Ok(broken) => broken,
        Err(error) => {
            log::error!("Failed to load broken {} feeds: {:?}", kind, error);
            return;
        }
    };

    if broken.is_empty() {
        return;
    }

    let names = broken
        .iter()
        .map(|feed| feed.name.as_str())
        .collect::<Vec<&str>>()
        .join(", ");

    deliver_note(
        api,
        format!("{} feeds awaiting manual review: {}", kind, names),
    );
}

fn deliver_note(api: &dyn ChatApi, text: String) {
    let channel = Config::bot_channel_name();

    if let Err(error) = api.post(&channel, &MessageContent::Text(text)) {
        log::error!("Failed to notify #{}: {:?}", channel, error);
    }
}
