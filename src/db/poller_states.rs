use crate::db;
use crate::models::feed::FeedKind;
use crate::models::poller_state::PollerState;
use crate::schema::poller_states;
use diesel::prelude::*;
use diesel::result::Error;

#[derive(Insertable)]
#[diesel(table_name = poller_states)]
struct NewPollerState<'a> {
    kind: &'a str,
    running: bool,
}

pub fn set_running(
    conn: &mut PgConnection,
    kind: FeedKind,
    running: bool,
) -> Result<PollerState, Error> {
    let row = NewPollerState {
        kind: kind.as_str(),
        running,
    };

    diesel::insert_into(poller_states::table)
        .values(&row)
        .on_conflict(poller_states::kind)
        .do_update()
        .set((
            poller_states::running.eq(running),
            poller_states::updated_at.eq(db::current_time()),
        ))
        .get_result::<PollerState>(conn)
}

pub fn find(conn: &mut PgConnection, kind: FeedKind) -> Option<PollerState> {
    match poller_states::table
        .filter(poller_states::kind.eq(kind.as_str()))
        .first::<PollerState>(conn)
    {
        Ok(record) => Some(record),
        _ => None,
    }
}

/// A kind with no recorded state polls by default; stopping is an explicit
/// operator action.
pub fn is_running(conn: &mut PgConnection, kind: FeedKind) -> bool {
    find(conn, kind).map(|state| state.running).unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use crate::db;
    use crate::models::feed::FeedKind;
    use diesel::connection::Connection;
    use diesel::result::Error;

    #[test]
    fn set_running_upserts_state() {
        let mut connection = db::establish_test_connection();

        connection.test_transaction::<_, Error, _>(|connection| {
            let state = super::set_running(connection, FeedKind::Youtube, false).unwrap();
            assert!(!state.running);

            let state = super::set_running(connection, FeedKind::Youtube, true).unwrap();
            assert!(state.running);

            Ok(())
        });
    }

    #[test]
    fn is_running_defaults_to_true() {
        let mut connection = db::establish_test_connection();

        connection.test_transaction::<_, Error, _>(|connection| {
            assert!(super::is_running(connection, FeedKind::Podcast));

            super::set_running(connection, FeedKind::Podcast, false).unwrap();
            assert!(!super::is_running(connection, FeedKind::Podcast));

            Ok(())
        });
    }
}
