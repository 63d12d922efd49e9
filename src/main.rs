use dotenv::dotenv;
use feed_courier::bot::discord_client;
use feed_courier::config::Config;
use feed_courier::db;
use feed_courier::db::poller_states;
use feed_courier::models::feed::FeedKind;
use feed_courier::scheduler::{FeedPoller, ReadyGate};
use std::thread;
use std::time::Duration;

fn main() {
    dotenv().ok();
    env_logger::init();

    let gate = ReadyGate::new();
    spawn_readiness_probe(gate.clone());

    let mut pollers: Vec<FeedPoller> = FeedKind::ALL
        .iter()
        .map(|kind| {
            FeedPoller::new(
                *kind,
                Duration::from_secs(interval_for(*kind)),
                gate.clone(),
            )
        })
        .collect();

    let mut connection = db::pool()
        .get()
        .expect("Failed to fetch a connection from the pool");

    for poller in pollers.iter_mut() {
        if poller_states::is_running(&mut connection, poller.kind()) {
            poller.start();
        } else {
            log::info!("The {} poller stays stopped", poller.kind());
        }
    }

    drop(connection);

    loop {
        thread::park();
    }
}

fn spawn_readiness_probe(gate: ReadyGate) {
    thread::spawn(move || loop {
        if discord_client::api().connection_ok() {
            log::info!("Discord connection confirmed");
            gate.set_ready();
            break;
        }

        log::warn!("Discord connection not ready yet");
        thread::sleep(Duration::from_secs(5));
    });
}

fn interval_for(kind: FeedKind) -> u64 {
    match kind {
        FeedKind::GenericRss => Config::rss_interval_seconds(),
        FeedKind::Youtube => Config::youtube_interval_seconds(),
        FeedKind::Podcast => Config::podcast_interval_seconds(),
        FeedKind::Scraped => Config::scraped_interval_seconds(),
    }
}
