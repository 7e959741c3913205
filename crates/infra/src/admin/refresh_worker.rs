//! Background refresh loop for the admin snapshot.

use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use super::AdminReadModel;

/// Default poll interval: signups from other surfaces become visible within
/// this bound.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(5);

/// Handle to control and join the background refresher.
#[derive(Debug)]
pub struct WorkerHandle {
    shutdown: mpsc::Sender<()>,
    join: Option<thread::JoinHandle<()>>,
}

impl WorkerHandle {
    /// Request graceful shutdown and wait for the worker to stop.
    pub fn shutdown(mut self) {
        let _ = self.shutdown.send(());
        if let Some(j) = self.join.take() {
            let _ = j.join();
        }
    }
}

/// Periodic snapshot refresher.
///
/// Re-reads the store on a fixed interval so the admin view reflects
/// signups made from other surfaces without an explicit reload.
#[derive(Debug)]
pub struct RefreshWorker;

impl RefreshWorker {
    /// Spawn a worker thread refreshing `read_model` every `interval`.
    pub fn spawn(read_model: Arc<AdminReadModel>, interval: Duration) -> WorkerHandle {
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let join = thread::Builder::new()
            .name("admin-refresh".to_string())
            .spawn(move || worker_loop(&read_model, &shutdown_rx, interval))
            .expect("failed to spawn admin refresh worker thread");

        WorkerHandle {
            shutdown: shutdown_tx,
            join: Some(join),
        }
    }
}

fn worker_loop(
    read_model: &AdminReadModel,
    shutdown_rx: &mpsc::Receiver<()>,
    interval: Duration,
) {
    loop {
        match shutdown_rx.recv_timeout(interval) {
            // Shutdown requested, or every handle dropped.
            Ok(()) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => read_model.refresh(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    use frostmart_newsletter::{EmailAddress, SignupSource, Subscription};

    use crate::store::{InMemorySubscriptionStore, SubscriptionStore};

    #[test]
    fn worker_picks_up_new_subscriptions() {
        let store = Arc::new(InMemorySubscriptionStore::new());
        let admin = Arc::new(AdminReadModel::new(
            store.clone() as Arc<dyn SubscriptionStore>
        ));
        let handle = RefreshWorker::spawn(admin.clone(), Duration::from_millis(20));

        store
            .add(Subscription::new(
                EmailAddress::parse("a@b.com").unwrap(),
                SignupSource::footer(),
            ))
            .unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        while admin.total() == 0 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(admin.total(), 1);

        handle.shutdown();
    }

    #[test]
    fn shutdown_stops_the_worker() {
        let store = Arc::new(InMemorySubscriptionStore::new());
        let admin = Arc::new(AdminReadModel::new(store as Arc<dyn SubscriptionStore>));
        let handle = RefreshWorker::spawn(admin, Duration::from_millis(10));

        // Returns only after the thread joined.
        handle.shutdown();
    }
}
