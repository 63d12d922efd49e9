use crate::bot::notifier;
use crate::bot::ChatApi;
use crate::config::Config;
use crate::db::feeds;
use crate::db::feeds::StatusUpdate;
use crate::http_client;
use crate::models::feed::{ChannelStatus, Feed, FeedKind, UrlStatus};
use crate::sync::reader;
use crate::sync::reader::FeedReaderError;
use diesel::result::Error;
use diesel::PgConnection;

/// Per-cycle health review for every feed of one kind. Both status axes are
/// recomputed and the resulting updates are written back in a single batch.
pub struct StatusReviewJob {
    kind: FeedKind,
}

impl StatusReviewJob {
    pub fn new(kind: FeedKind) -> Self {
        StatusReviewJob { kind }
    }

    /// Returns the feeds healthy enough to sync this cycle.
    pub fn execute(
        &self,
        conn: &mut PgConnection,
        api: &dyn ChatApi,
    ) -> Result<Vec<Feed>, Error> {
        let all_feeds = feeds::list_by_kind(conn, self.kind)?;

        let mut updates: Vec<StatusUpdate> = Vec::with_capacity(all_feeds.len());
        let mut active: Vec<Feed> = Vec::new();

        for feed in all_feeds {
            let update = review(&feed, api);

            if update.url_status == UrlStatus::Error && feed.url_status() != UrlStatus::Error {
                log::error!("Feed {} reached the failure limit", feed.name);
                notifier::feed_broken(api, &feed);
            }

            if update.channel_status == ChannelStatus::Error
                && feed.channel_status() != ChannelStatus::Error
            {
                notifier::channel_missing(api, &feed);
            }

            if update.url_status != UrlStatus::Error
                && update.channel_status == ChannelStatus::Ok
            {
                active.push(feed);
            }

            updates.push(update);
        }

        feeds::apply_status_updates(conn, &updates)?;

        Ok(active)
    }
}

fn review(feed: &Feed, api: &dyn ChatApi) -> StatusUpdate {
    let (url_status, url_status_counter) = match feed.url_status() {
        // broken feeds are not fetched again until manually reset
        UrlStatus::Error => (UrlStatus::Error, feed.url_status_counter),
        current => next_url_status(
            current,
            feed.url_status_counter,
            validate(feed),
            Config::url_failure_limit(),
        ),
    };

    let channel_status = match api.channel_exists(&feed.channel_name) {
        Ok(true) => ChannelStatus::Ok,
        Ok(false) => ChannelStatus::Error,
        Err(error) => {
            log::error!(
                "Failed to check channel #{} for feed {}: {:?}",
                feed.channel_name,
                feed.name,
                error
            );

            feed.channel_status()
        }
    };

    StatusUpdate {
        feed_id: feed.id,
        url_status,
        url_status_counter,
        channel_status,
    }
}

/// A feed URL validates when it can be fetched and the document parses into
/// a recognized shape.
pub fn validate(feed: &Feed) -> bool {
    let kind = match feed.kind() {
        Ok(kind) => kind,
        Err(error) => {
            log::error!("Feed {} has a malformed record: {}", feed.name, error);
            return false;
        }
    };

    match http_client::fetch_document(&feed.link) {
        Ok(body) => match reader::read_document(&body, kind, &feed.link) {
            Ok(_) => true,
            Err(FeedReaderError::UnrecognizedShape { msg }) => {
                log::info!("Feed {} fetched but did not parse: {}", feed.name, msg);
                false
            }
            Err(FeedReaderError::Fetch { msg }) => {
                log::info!("Feed {} could not be read: {}", feed.name, msg);
                false
            }
        },
        Err(error) => {
            log::info!("Feed {} could not be fetched: {:?}", feed.name, error);
            false
        }
    }
}

/// URL-axis transition. A healthy feed always passes through `stale` before
/// it can become `error`, and only the counter reaching `failure_limit`
/// makes it `error`. A successful validation resets everything.
pub fn next_url_status(
    current: UrlStatus,
    counter: i32,
    validated: bool,
    failure_limit: i32,
) -> (UrlStatus, i32) {
    match current {
        // manual reset is the only exit, even if the url works again
        UrlStatus::Error => (UrlStatus::Error, counter),
        _ if validated => (UrlStatus::Ok, 0),
        UrlStatus::Ok => (UrlStatus::Stale, counter + 1),
        UrlStatus::Stale => {
            let next_counter = counter + 1;

            if next_counter >= failure_limit {
                (UrlStatus::Error, next_counter)
            } else {
                (UrlStatus::Stale, next_counter)
            }
        }
    }
}
