use crate::bot::discord_client;
use crate::bot::notifier;
use crate::db;
use crate::db::poller_states;
use crate::models::feed::FeedKind;
use crate::sync::sync_feed_job::FeedSyncError;
use crate::sync::{StatusReviewJob, SyncFeedJob};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

/// Broken feeds are re-surfaced to the operator channel every this many
/// cycles of their kind's poller.
const ERROR_REMINDER_CYCLES: u64 = 10;

/// Pollers block on the gate until the platform connection is confirmed.
#[derive(Clone, Default)]
pub struct ReadyGate {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl ReadyGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_ready(&self) {
        let (lock, condvar) = &*self.inner;

        let mut ready = lock.lock().unwrap();
        *ready = true;

        condvar.notify_all();
    }

    pub fn wait_ready(&self) {
        let (lock, condvar) = &*self.inner;

        let mut ready = lock.lock().unwrap();

        while !*ready {
            ready = condvar.wait(ready).unwrap();
        }
    }

    pub fn is_ready(&self) -> bool {
        *self.inner.0.lock().unwrap()
    }
}

/// One polling loop per feed kind. Work and sleep alternate on a dedicated
/// thread, so ticks never overlap and every feed row has a single writer.
/// Start/stop intent is persisted and survives restarts.
pub struct FeedPoller {
    kind: FeedKind,
    interval: Duration,
    gate: ReadyGate,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl FeedPoller {
    pub fn new(kind: FeedKind, interval: Duration, gate: ReadyGate) -> Self {
        FeedPoller {
            kind,
            interval,
            gate,
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    pub fn kind(&self) -> FeedKind {
        self.kind
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }

        self.persist_intent(true);
        self.running.store(true, Ordering::SeqCst);

        let kind = self.kind;
        let interval = self.interval;
        let gate = self.gate.clone();
        let running = self.running.clone();

        self.handle = Some(thread::spawn(move || {
            gate.wait_ready();

            log::info!("Started the {} poller", kind);

            let mut cycle: u64 = 0;

            while running.load(Ordering::SeqCst) {
                run_tick(kind, cycle);
                cycle += 1;

                thread::sleep(interval);
            }

            log::info!("Stopped the {} poller", kind);
        }));
    }

    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }

        self.persist_intent(false);
        self.running.store(false, Ordering::SeqCst);

        // the thread winds down after its current sleep
        self.handle = None;
    }

    fn persist_intent(&self, running: bool) {
        match db::pool().get() {
            Ok(mut connection) => {
                if let Err(error) = poller_states::set_running(&mut connection, self.kind, running)
                {
                    log::error!(
                        "Failed to persist the {} poller state: {:?}",
                        self.kind,
                        error
                    );
                }
            }
            Err(error) => {
                log::error!("Failed to fetch a connection from the pool: {:?}", error)
            }
        }
    }
}

fn run_tick(kind: FeedKind, cycle: u64) {
    let mut connection = match db::pool().get() {
        Ok(connection) => connection,
        Err(error) => {
            log::error!("Failed to fetch a connection from the pool: {:?}", error);
            return;
        }
    };

    let api = discord_client::api();

    let active = match StatusReviewJob::new(kind).execute(&mut connection, api) {
        Ok(active) => active,
        Err(error) => {
            log::error!("Failed to review {} feeds: {:?}", kind, error);
            return;
        }
    };

    if cycle % ERROR_REMINDER_CYCLES == 0 {
        notifier::remind_broken_feeds(&mut connection, api, kind);
    }

    for feed in active {
        // a failing feed never takes the rest of the tick down with it
        match SyncFeedJob::new(feed.id).execute(&mut connection, api) {
            Ok(()) => (),
            Err(FeedSyncError::PlatformError { msg }) => {
                log::error!("Failed to publish updates for feed {}: {}", feed.name, msg);
                notifier::platform_failure(api, &feed, &msg);
            }
            Err(error) => {
                log::error!("Failed to process feed {}: {:?}", feed.name, error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{FeedPoller, ReadyGate};
    use crate::models::feed::FeedKind;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn ready_gate_releases_waiters() {
        let gate = ReadyGate::new();
        assert!(!gate.is_ready());

        let waiter_gate = gate.clone();
        let waiter = thread::spawn(move || {
            waiter_gate.wait_ready();
            true
        });

        gate.set_ready();

        assert!(waiter.join().unwrap());
        assert!(gate.is_ready());
    }

    #[test]
    fn waiting_on_an_open_gate_returns_immediately() {
        let gate = ReadyGate::new();
        gate.set_ready();

        gate.wait_ready();
    }

    #[test]
    fn a_new_poller_is_not_running() {
        let poller = FeedPoller::new(
            FeedKind::GenericRss,
            Duration::from_secs(60),
            ReadyGate::new(),
        );

        assert!(!poller.is_running());
        assert_eq!(poller.kind(), FeedKind::GenericRss);
    }

    #[test]
    fn stopping_a_stopped_poller_is_a_no_op() {
        let mut poller = FeedPoller::new(
            FeedKind::Podcast,
            Duration::from_secs(60),
            ReadyGate::new(),
        );

        poller.stop();

        assert!(!poller.is_running());
    }
}
