use crate::schema::seen_links;
use chrono::{DateTime, Utc};
use diesel::{Identifiable, Queryable};

/// One published link per row. `link` is replaced in place when a
/// near-duplicate revision of the item is published; `first_seen` never
/// changes after insert.
#[derive(Queryable, Identifiable, Debug, Clone, Eq, PartialEq)]
#[diesel(table_name = seen_links)]
pub struct SeenLink {
    pub id: i64,
    pub feed_id: i64,
    pub link: String,
    pub first_seen: DateTime<Utc>,
}
