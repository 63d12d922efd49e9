diesel::table! {
    feed_filters (id) {
        id -> Int8,
        feed_id -> Int8,
        mode -> Text,
        pattern -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    feeds (id) {
        id -> Int8,
        name -> Text,
        link -> Text,
        channel_name -> Text,
        kind -> Text,
        added_by -> Nullable<Text>,
        url_status -> Text,
        url_status_counter -> Int4,
        channel_status -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    poller_states (kind) {
        kind -> Text,
        running -> Bool,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    seen_links (id) {
        id -> Int8,
        feed_id -> Int8,
        link -> Text,
        first_seen -> Timestamptz,
    }
}

diesel::joinable!(feed_filters -> feeds (feed_id));
diesel::joinable!(seen_links -> feeds (feed_id));

diesel::allow_tables_to_appear_in_same_query!(feed_filters, feeds, poller_states, seen_links,);
