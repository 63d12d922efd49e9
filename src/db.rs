use crate::config::Config;
use chrono::prelude::*;
use chrono::{DateTime, Utc};
use diesel::connection::Connection;
use diesel::pg::PgConnection;
use diesel::r2d2;
use dotenv::dotenv;
use std::sync::OnceLock;

pub mod feeds;
pub mod filters;
pub mod poller_states;
pub mod seen_links;

static POOL: OnceLock<r2d2::Pool<r2d2::ConnectionManager<PgConnection>>> = OnceLock::new();

pub fn establish_test_connection() -> PgConnection {
    dotenv().ok();

    let url = Config::database_url();

    PgConnection::establish(&url).unwrap_or_else(|_| panic!("Error connecting to {}", url))
}

pub fn current_time() -> DateTime<Utc> {
    Utc::now().round_subsecs(0)
}

pub fn pool() -> &'static r2d2::Pool<r2d2::ConnectionManager<PgConnection>> {
    POOL.get_or_init(create_connection_pool)
}

fn create_connection_pool() -> r2d2::Pool<r2d2::ConnectionManager<PgConnection>> {
    let manager = r2d2::ConnectionManager::<PgConnection>::new(Config::database_url());

    r2d2::Pool::builder()
        .max_size(Config::db_pool_number())
        .build(manager)
        .unwrap()
}
