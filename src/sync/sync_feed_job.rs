use crate::bot::ChatApi;
use crate::config::Config;
use crate::db::{feeds, filters};
use crate::deliver::{PublishJob, PublishJobError};
use crate::http_client;
use crate::models::feed::Feed;
use crate::sync;
use crate::sync::reader;
use crate::sync::reader::FeedReaderError;
use diesel::result::Error;
use diesel::PgConnection;

#[derive(Debug, Eq, PartialEq)]
pub enum FeedSyncError {
    FeedError { msg: String },
    DbError { msg: String },
    PlatformError { msg: String },
}

impl From<Error> for FeedSyncError {
    fn from(error: Error) -> Self {
        let msg = format!("{:?}", error);

        FeedSyncError::DbError { msg }
    }
}

/// One feed, one cycle: fetch the document, extract and filter candidates,
/// hand them to the publish engine. Fetch and parse failures feed the
/// url-status counter.
#[derive(Debug)]
pub struct SyncFeedJob {
    feed_id: i64,
}

impl SyncFeedJob {
    pub fn new(feed_id: i64) -> Self {
        Self { feed_id }
    }

    pub fn execute(
        &self,
        conn: &mut PgConnection,
        api: &dyn ChatApi,
    ) -> Result<(), FeedSyncError> {
        let feed = feeds::find(conn, self.feed_id).ok_or(FeedSyncError::DbError {
            msg: "Feed not found".to_string(),
        })?;

        let kind = feed
            .kind()
            .map_err(|msg| FeedSyncError::FeedError { msg })?;

        let body = match http_client::fetch_document(&feed.link) {
            Ok(body) => body,
            Err(error) => {
                return self.register_failure(conn, &feed, format!("{:?}", error));
            }
        };

        let fetched = match reader::read_document(&body, kind, &feed.link) {
            Ok(fetched) => fetched,
            Err(FeedReaderError::UnrecognizedShape { msg }) => {
                // logged apart from fetch failures for operator diagnosis,
                // but counted the same by the status tracker
                log::warn!("Feed {} served a document of no known shape", feed.name);
                return self.register_failure(conn, &feed, msg);
            }
            Err(FeedReaderError::Fetch { msg }) => {
                return self.register_failure(conn, &feed, msg);
            }
        };

        let feed_filters = filters::find_for_feed(conn, feed.id)?;
        let candidates = sync::extract(fetched, &feed_filters, Config::max_items_per_sync());

        log::info!(
            "Feed {}: {} candidate items after filtering",
            feed.name,
            candidates.len()
        );

        PublishJob::new(feed.id)
            .process(conn, api, &feed, candidates)
            .map_err(|error| match error {
                PublishJobError::DbError { msg } => FeedSyncError::DbError { msg },
                PublishJobError::PlatformError { msg } => FeedSyncError::PlatformError { msg },
            })
    }

    fn register_failure(
        &self,
        conn: &mut PgConnection,
        feed: &Feed,
        msg: String,
    ) -> Result<(), FeedSyncError> {
        if let Err(error) = feeds::mark_url_failure(conn, feed, Config::url_failure_limit()) {
            log::error!(
                "Failed to record a failure for feed {}: {:?}",
                feed.name,
                error
            );
        }

        Err(FeedSyncError::FeedError { msg })
    }
}
