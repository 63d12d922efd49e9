use crate::bot::ChatApi;
use crate::db::seen_links;
use crate::deliver::render_message;
use crate::models::feed::Feed;
use crate::similarity;
use crate::sync::reader::FetchedFeedItem;
use diesel::result::Error;
use diesel::PgConnection;

#[derive(Debug, Eq, PartialEq)]
pub enum PublishJobError {
    DbError { msg: String },
    PlatformError { msg: String },
}

impl From<Error> for PublishJobError {
    fn from(error: Error) -> Self {
        let msg = format!("{:?}", error);

        PublishJobError::DbError { msg }
    }
}

/// Compares candidates against the feed's seen-log and publishes the new
/// ones: a near-duplicate of a logged link edits the original message in
/// place, anything else is posted fresh. The log is only written after the
/// platform confirmed the action, so a failed publish is retried next cycle
/// instead of being lost.
pub struct PublishJob {
    feed_id: i64,
}

impl PublishJob {
    pub fn new(feed_id: i64) -> Self {
        PublishJob { feed_id }
    }

    pub fn process(
        &self,
        conn: &mut PgConnection,
        api: &dyn ChatApi,
        feed: &Feed,
        candidates: Vec<FetchedFeedItem>,
    ) -> Result<(), PublishJobError> {
        for item in candidates {
            self.publish_item(conn, api, feed, &item)?;
        }

        Ok(())
    }

    fn publish_item(
        &self,
        conn: &mut PgConnection,
        api: &dyn ChatApi,
        feed: &Feed,
        item: &FetchedFeedItem,
    ) -> Result<(), PublishJobError> {
        if seen_links::exists(conn, self.feed_id, &item.link)? {
            log::debug!(
                "Skipping already handled link {} for feed {}",
                item.link,
                feed.name
            );

            return Ok(());
        }

        let known = seen_links::links_for_feed(conn, self.feed_id)?;

        match similarity::find_similar(&item.link, &known) {
            Some(logged) => {
                let old_link = logged.clone();

                self.publish_revision(conn, api, feed, &old_link, &item.link)
            }
            None => self.publish_new(conn, api, feed, item),
        }
    }

    fn publish_revision(
        &self,
        conn: &mut PgConnection,
        api: &dyn ChatApi,
        feed: &Feed,
        old_link: &str,
        new_link: &str,
    ) -> Result<(), PublishJobError> {
        log::info!(
            "Feed {}: {} looks like a revision of {}",
            feed.name,
            new_link,
            old_link
        );

        let edited = api
            .find_and_replace(&feed.channel_name, old_link, new_link)
            .map_err(|error| PublishJobError::PlatformError {
                msg: format!("{:?}", error),
            })?;

        if !edited {
            log::warn!(
                "Feed {}: no recent message held {}, only the log was updated",
                feed.name,
                old_link
            );
        }

        seen_links::replace_link(conn, self.feed_id, old_link, new_link)?;

        Ok(())
    }

    fn publish_new(
        &self,
        conn: &mut PgConnection,
        api: &dyn ChatApi,
        feed: &Feed,
        item: &FetchedFeedItem,
    ) -> Result<(), PublishJobError> {
        let content = render_message::render(item);

        api.post(&feed.channel_name, &content)
            .map_err(|error| PublishJobError::PlatformError {
                msg: format!("{:?}", error),
            })?;

        seen_links::create(conn, self.feed_id, &item.link)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{PublishJob, PublishJobError};
    use crate::bot::discord_client::{Error, HttpError};
    use crate::bot::{ChatApi, MessageContent};
    use crate::db;
    use crate::db::feeds::NewFeed;
    use crate::db::{feeds, seen_links};
    use crate::models::feed::{Feed, FeedKind};
    use crate::sync::reader::{FetchedFeedItem, ItemKind};
    use diesel::connection::Connection;
    use diesel::PgConnection;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingChat {
        posts: RefCell<Vec<(String, MessageContent)>>,
        edits: RefCell<Vec<(String, String, String)>>,
        fail_posts: bool,
    }

    impl ChatApi for RecordingChat {
        fn post(&self, channel_name: &str, content: &MessageContent) -> Result<String, Error> {
            if self.fail_posts {
                return Err(Error::HttpError(HttpError {
                    code: 403,
                    message: "missing permissions".to_string(),
                }));
            }

            self.posts
                .borrow_mut()
                .push((channel_name.to_string(), content.clone()));

            Ok(format!("message-{}", self.posts.borrow().len()))
        }

        fn find_and_replace(
            &self,
            channel_name: &str,
            old_content: &str,
            new_content: &str,
        ) -> Result<bool, Error> {
            self.edits.borrow_mut().push((
                channel_name.to_string(),
                old_content.to_string(),
                new_content.to_string(),
            ));

            Ok(true)
        }

        fn channel_exists(&self, _channel_name: &str) -> Result<bool, Error> {
            Ok(true)
        }
    }

    fn create_feed(connection: &mut PgConnection) -> Feed {
        let new_feed = NewFeed::builder()
            .name("releases")
            .link("https://example.com/feed.xml")
            .channel_name("news")
            .kind(FeedKind::GenericRss)
            .build();

        feeds::create(connection, new_feed).unwrap()
    }

    fn candidate(link: &str) -> FetchedFeedItem {
        FetchedFeedItem {
            title: link.to_string(),
            description: None,
            link: link.to_string(),
            kind: ItemKind::Article,
            enclosure_url: None,
        }
    }

    fn long_link(tail: &str) -> String {
        format!("https://example.com/articles/{}{}", "a".repeat(80), tail)
    }

    #[test]
    fn known_links_are_skipped_without_any_platform_action() {
        let mut connection = db::establish_test_connection();

        connection.test_transaction::<_, diesel::result::Error, _>(|connection| {
            let feed = create_feed(connection);
            seen_links::create(connection, feed.id, "https://example.com/a").unwrap();

            let chat = RecordingChat::default();
            let job = PublishJob::new(feed.id);

            job.process(
                connection,
                &chat,
                &feed,
                vec![candidate("https://example.com/a")],
            )
            .unwrap();

            assert!(chat.posts.borrow().is_empty());
            assert!(chat.edits.borrow().is_empty());
            assert_eq!(
                seen_links::links_for_feed(connection, feed.id).unwrap(),
                vec!["https://example.com/a".to_string()]
            );

            Ok(())
        });
    }

    #[test]
    fn novel_links_are_posted_in_order_and_logged() {
        let mut connection = db::establish_test_connection();

        connection.test_transaction::<_, diesel::result::Error, _>(|connection| {
            let feed = create_feed(connection);

            let chat = RecordingChat::default();
            let job = PublishJob::new(feed.id);

            job.process(
                connection,
                &chat,
                &feed,
                vec![
                    candidate("https://example.com/one"),
                    candidate("https://example.com/two"),
                ],
            )
            .unwrap();

            let posts = chat.posts.borrow();
            assert_eq!(posts.len(), 2);
            assert_eq!(posts[0].0, "news");
            assert_eq!(
                posts[0].1,
                MessageContent::Text("https://example.com/one".to_string())
            );
            assert_eq!(
                posts[1].1,
                MessageContent::Text("https://example.com/two".to_string())
            );

            let mut logged = seen_links::links_for_feed(connection, feed.id).unwrap();
            logged.sort();
            assert_eq!(
                logged,
                vec![
                    "https://example.com/one".to_string(),
                    "https://example.com/two".to_string()
                ]
            );

            Ok(())
        });
    }

    #[test]
    fn near_duplicates_edit_the_old_message_instead_of_posting() {
        let mut connection = db::establish_test_connection();

        connection.test_transaction::<_, diesel::result::Error, _>(|connection| {
            let feed = create_feed(connection);

            let old_link = long_link("/typo");
            let corrected = long_link("/typi");

            seen_links::create(connection, feed.id, &old_link).unwrap();

            let chat = RecordingChat::default();
            let job = PublishJob::new(feed.id);

            job.process(connection, &chat, &feed, vec![candidate(&corrected)])
                .unwrap();

            assert!(chat.posts.borrow().is_empty());

            let edits = chat.edits.borrow();
            assert_eq!(edits.len(), 1);
            assert_eq!(edits[0], ("news".to_string(), old_link, corrected.clone()));

            assert_eq!(
                seen_links::links_for_feed(connection, feed.id).unwrap(),
                vec![corrected]
            );

            Ok(())
        });
    }

    #[test]
    fn platform_failures_do_not_advance_the_log() {
        let mut connection = db::establish_test_connection();

        connection.test_transaction::<_, diesel::result::Error, _>(|connection| {
            let feed = create_feed(connection);

            let chat = RecordingChat {
                fail_posts: true,
                ..RecordingChat::default()
            };
            let job = PublishJob::new(feed.id);

            let result = job.process(
                connection,
                &chat,
                &feed,
                vec![candidate("https://example.com/one")],
            );

            match result {
                Err(PublishJobError::PlatformError { .. }) => (),
                other => panic!("unexpected result {:?}", other),
            }

            assert!(seen_links::links_for_feed(connection, feed.id)
                .unwrap()
                .is_empty());

            Ok(())
        });
    }
}
