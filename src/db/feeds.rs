use crate::db;
use crate::models::feed::{ChannelStatus, Feed, FeedKind, UrlStatus};
use crate::schema::{feed_filters, feeds};
use diesel::prelude::*;
use diesel::result::Error;
use typed_builder::TypedBuilder;

#[derive(Insertable)]
#[diesel(table_name = feeds)]
struct NewFeedRow<'a> {
    name: &'a str,
    link: &'a str,
    channel_name: &'a str,
    kind: &'a str,
    added_by: Option<&'a str>,
    url_status: &'a str,
    url_status_counter: i32,
    channel_status: &'a str,
}

#[derive(TypedBuilder)]
pub struct NewFeed<'a> {
    pub name: &'a str,
    pub link: &'a str,
    pub channel_name: &'a str,
    pub kind: FeedKind,
    #[builder(default)]
    pub added_by: Option<&'a str>,
}

/// Pending status fields for one feed, produced by a review pass and written
/// back in a single batch.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct StatusUpdate {
    pub feed_id: i64,
    pub url_status: UrlStatus,
    pub url_status_counter: i32,
    pub channel_status: ChannelStatus,
}

pub fn create(conn: &mut PgConnection, new_feed: NewFeed) -> Result<Feed, Error> {
    let row = NewFeedRow {
        name: new_feed.name.trim(),
        link: new_feed.link.trim(),
        channel_name: new_feed.channel_name,
        kind: new_feed.kind.as_str(),
        added_by: new_feed.added_by,
        url_status: UrlStatus::Ok.as_str(),
        url_status_counter: 0,
        channel_status: ChannelStatus::Ok.as_str(),
    };

    diesel::insert_into(feeds::table)
        .values(row)
        .get_result::<Feed>(conn)
}

pub fn find(conn: &mut PgConnection, id: i64) -> Option<Feed> {
    match feeds::table.filter(feeds::id.eq(id)).first::<Feed>(conn) {
        Ok(record) => Some(record),
        _ => None,
    }
}

pub fn find_by_name(conn: &mut PgConnection, name: &str) -> Option<Feed> {
    match feeds::table
        .filter(feeds::name.eq(name))
        .first::<Feed>(conn)
    {
        Ok(record) => Some(record),
        _ => None,
    }
}

pub fn all(conn: &mut PgConnection) -> Result<Vec<Feed>, Error> {
    feeds::table.order(feeds::id).load::<Feed>(conn)
}

pub fn list_by_kind(conn: &mut PgConnection, kind: FeedKind) -> Result<Vec<Feed>, Error> {
    feeds::table
        .filter(feeds::kind.eq(kind.as_str()))
        .order(feeds::id)
        .load::<Feed>(conn)
}

pub fn list_broken_by_kind(conn: &mut PgConnection, kind: FeedKind) -> Result<Vec<Feed>, Error> {
    feeds::table
        .filter(feeds::kind.eq(kind.as_str()))
        .filter(feeds::url_status.eq(UrlStatus::Error.as_str()))
        .order(feeds::id)
        .load::<Feed>(conn)
}

pub fn rename(conn: &mut PgConnection, feed: &Feed, new_name: &str) -> Result<Feed, Error> {
    diesel::update(feed)
        .set((
            feeds::name.eq(new_name.trim()),
            feeds::updated_at.eq(db::current_time()),
        ))
        .get_result::<Feed>(conn)
}

pub fn mark_url_ok(conn: &mut PgConnection, feed: &Feed) -> Result<Feed, Error> {
    diesel::update(feed)
        .set((
            feeds::url_status.eq(UrlStatus::Ok.as_str()),
            feeds::url_status_counter.eq(0),
            feeds::updated_at.eq(db::current_time()),
        ))
        .get_result::<Feed>(conn)
}

/// Records one more consecutive failure. The feed passes through `stale`
/// and only becomes `error` once the counter reaches `failure_limit`.
pub fn mark_url_failure(
    conn: &mut PgConnection,
    feed: &Feed,
    failure_limit: i32,
) -> Result<Feed, Error> {
    let next_counter = if feed.url_status_counter == failure_limit {
        failure_limit
    } else {
        feed.url_status_counter + 1
    };

    let next_status = if next_counter >= failure_limit {
        UrlStatus::Error
    } else {
        UrlStatus::Stale
    };

    diesel::update(feed)
        .set((
            feeds::url_status.eq(next_status.as_str()),
            feeds::url_status_counter.eq(next_counter),
            feeds::updated_at.eq(db::current_time()),
        ))
        .get_result::<Feed>(conn)
}

pub fn set_channel_status(
    conn: &mut PgConnection,
    feed: &Feed,
    status: ChannelStatus,
) -> Result<Feed, Error> {
    diesel::update(feed)
        .set((
            feeds::channel_status.eq(status.as_str()),
            feeds::updated_at.eq(db::current_time()),
        ))
        .get_result::<Feed>(conn)
}

/// Manual exit from `error`. Nothing else recovers a broken feed.
pub fn reset_url_status(conn: &mut PgConnection, feed: &Feed) -> Result<Feed, Error> {
    mark_url_ok(conn, feed)
}

pub fn apply_status_updates(
    conn: &mut PgConnection,
    updates: &[StatusUpdate],
) -> Result<usize, Error> {
    conn.transaction(|conn| {
        let mut applied = 0;

        for update in updates {
            applied += diesel::update(feeds::table.filter(feeds::id.eq(update.feed_id)))
                .set((
                    feeds::url_status.eq(update.url_status.as_str()),
                    feeds::url_status_counter.eq(update.url_status_counter),
                    feeds::channel_status.eq(update.channel_status.as_str()),
                    feeds::updated_at.eq(db::current_time()),
                ))
                .execute(conn)?;
        }

        Ok(applied)
    })
}

/// Removes the feed and its filters. Seen-log rows are kept for audit and
/// purged separately via `seen_links::delete_for_feed`.
pub fn remove_feed(conn: &mut PgConnection, feed_id: i64) -> Result<usize, Error> {
    conn.transaction(|conn| {
        diesel::delete(feed_filters::table.filter(feed_filters::feed_id.eq(feed_id)))
            .execute(conn)?;

        diesel::delete(feeds::table.filter(feeds::id.eq(feed_id))).execute(conn)
    })
}
