use crate::models::feed_filter::{FeedFilter, FilterMode};
use crate::schema::feed_filters;
use diesel::prelude::*;
use diesel::result::Error;

#[derive(Insertable)]
#[diesel(table_name = feed_filters)]
struct NewFeedFilter<'a> {
    feed_id: i64,
    mode: &'a str,
    pattern: &'a str,
}

pub fn create(
    conn: &mut PgConnection,
    feed_id: i64,
    mode: FilterMode,
    pattern: &str,
) -> Result<FeedFilter, Error> {
    let new_filter = NewFeedFilter {
        feed_id,
        mode: mode.as_str(),
        pattern: pattern.trim(),
    };

    diesel::insert_into(feed_filters::table)
        .values(new_filter)
        .get_result::<FeedFilter>(conn)
}

pub fn find_for_feed(conn: &mut PgConnection, feed_id: i64) -> Result<Vec<FeedFilter>, Error> {
    feed_filters::table
        .filter(feed_filters::feed_id.eq(feed_id))
        .order(feed_filters::id)
        .load::<FeedFilter>(conn)
}

pub fn remove(conn: &mut PgConnection, filter_id: i64) -> Result<usize, Error> {
    diesel::delete(feed_filters::table.filter(feed_filters::id.eq(filter_id))).execute(conn)
}

#[cfg(test)]
mod tests {
    use crate::db;
    use crate::db::feeds;
    use crate::db::feeds::NewFeed;
    use crate::models::feed::{Feed, FeedKind};
    use crate::models::feed_filter::FilterMode;
    use diesel::connection::Connection;
    use diesel::result::Error;
    use diesel::PgConnection;

    fn create_feed(connection: &mut PgConnection) -> Feed {
        let new_feed = NewFeed::builder()
            .name("releases")
            .link("https://example.com/feed.xml")
            .channel_name("news")
            .kind(FeedKind::GenericRss)
            .build();

        feeds::create(connection, new_feed).unwrap()
    }

    #[test]
    fn create_attaches_filter_to_feed() {
        let mut connection = db::establish_test_connection();

        connection.test_transaction::<_, Error, _>(|connection| {
            let feed = create_feed(connection);

            let filter =
                super::create(connection, feed.id, FilterMode::Deny, "spoiler").unwrap();

            assert_eq!(filter.feed_id, feed.id);
            assert_eq!(filter.mode().unwrap(), FilterMode::Deny);
            assert_eq!(filter.pattern, "spoiler");

            Ok(())
        });
    }

    #[test]
    fn find_for_feed_returns_filters_in_insertion_order() {
        let mut connection = db::establish_test_connection();

        connection.test_transaction::<_, Error, _>(|connection| {
            let feed = create_feed(connection);

            super::create(connection, feed.id, FilterMode::Deny, "spoiler").unwrap();
            super::create(connection, feed.id, FilterMode::Allow, "official").unwrap();

            let filters = super::find_for_feed(connection, feed.id).unwrap();

            assert_eq!(filters.len(), 2);
            assert_eq!(filters[0].pattern, "spoiler");
            assert_eq!(filters[1].pattern, "official");

            Ok(())
        });
    }

    #[test]
    fn remove_deletes_single_filter() {
        let mut connection = db::establish_test_connection();

        connection.test_transaction::<_, Error, _>(|connection| {
            let feed = create_feed(connection);

            let filter =
                super::create(connection, feed.id, FilterMode::Deny, "spoiler").unwrap();

            assert_eq!(super::remove(connection, filter.id).unwrap(), 1);
            assert!(super::find_for_feed(connection, feed.id)
                .unwrap()
                .is_empty());

            Ok(())
        });
    }
}
