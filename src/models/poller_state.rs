use crate::schema::poller_states;
use chrono::{DateTime, Utc};
use diesel::{Identifiable, Queryable};

#[derive(Queryable, Identifiable, Debug, Clone, Eq, PartialEq)]
#[diesel(table_name = poller_states)]
#[diesel(primary_key(kind))]
pub struct PollerState {
    pub kind: String,
    pub running: bool,
    pub updated_at: DateTime<Utc>,
}
