use crate::models::seen_link::SeenLink;
use crate::schema::seen_links;
use diesel::prelude::*;
use diesel::result::Error;

#[derive(Insertable)]
#[diesel(table_name = seen_links)]
struct NewSeenLink<'a> {
    feed_id: i64,
    link: &'a str,
}

pub fn create(conn: &mut PgConnection, feed_id: i64, link: &str) -> Result<SeenLink, Error> {
    let new_link = NewSeenLink { feed_id, link };

    diesel::insert_into(seen_links::table)
        .values(new_link)
        .get_result::<SeenLink>(conn)
}

pub fn exists(conn: &mut PgConnection, feed_id: i64, link: &str) -> Result<bool, Error> {
    diesel::select(diesel::dsl::exists(
        seen_links::table
            .filter(seen_links::feed_id.eq(feed_id))
            .filter(seen_links::link.eq(link)),
    ))
    .get_result(conn)
}

/// Logged links for the feed, most recently seen first.
pub fn links_for_feed(conn: &mut PgConnection, feed_id: i64) -> Result<Vec<String>, Error> {
    seen_links::table
        .filter(seen_links::feed_id.eq(feed_id))
        .order(seen_links::first_seen.desc())
        .select(seen_links::link)
        .load::<String>(conn)
}

/// Repoints the row at the corrected address. The row keeps representing
/// the same logical item, so `first_seen` is untouched.
pub fn replace_link(
    conn: &mut PgConnection,
    feed_id: i64,
    old_link: &str,
    new_link: &str,
) -> Result<usize, Error> {
    diesel::update(
        seen_links::table
            .filter(seen_links::feed_id.eq(feed_id))
            .filter(seen_links::link.eq(old_link)),
    )
    .set(seen_links::link.eq(new_link))
    .execute(conn)
}

pub fn delete_for_feed(conn: &mut PgConnection, feed_id: i64) -> Result<usize, Error> {
    diesel::delete(seen_links::table.filter(seen_links::feed_id.eq(feed_id))).execute(conn)
}
