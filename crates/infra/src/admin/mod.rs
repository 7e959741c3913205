//! Read-only admin view over the subscription store.
//!
//! The admin surface never mutates individual entries; it observes a
//! snapshot for operational visibility, exports it, and owns the one
//! destructive operation (clear-all) behind an explicit confirmation.

mod refresh_worker;

pub use refresh_worker::{REFRESH_INTERVAL, RefreshWorker, WorkerHandle};

use std::sync::{Arc, RwLock};

use chrono::Utc;

use frostmart_newsletter::Subscription;

use crate::store::{StoreError, SubscriptionStore};

/// CSV rendering of a snapshot, plus the suggested download filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

/// Polling read model over the subscription store.
///
/// The snapshot is eventually consistent: a signup made from another surface
/// becomes visible after the next refresh, so staleness is bounded by the
/// interval of the worker that owns this model.
pub struct AdminReadModel {
    store: Arc<dyn SubscriptionStore>,
    snapshot: RwLock<Vec<Subscription>>,
}

impl AdminReadModel {
    /// Create the read model and take an initial snapshot.
    pub fn new(store: Arc<dyn SubscriptionStore>) -> Self {
        let snapshot = RwLock::new(store.list());
        Self { store, snapshot }
    }

    /// Re-read the store into the snapshot.
    pub fn refresh(&self) {
        let entries = self.store.list();
        if let Ok(mut snapshot) = self.snapshot.write() {
            *snapshot = entries;
        }
    }

    /// The current snapshot, in insertion order.
    pub fn snapshot(&self) -> Vec<Subscription> {
        self.snapshot
            .read()
            .map(|snapshot| snapshot.clone())
            .unwrap_or_default()
    }

    pub fn total(&self) -> usize {
        self.snapshot.read().map(|s| s.len()).unwrap_or(0)
    }

    /// Render the snapshot as CSV.
    ///
    /// Returns `None` when there is nothing to export (the export control is
    /// a silent no-op on an empty snapshot).
    pub fn export_csv(&self) -> Option<CsvExport> {
        let entries = self.snapshot();
        if entries.is_empty() {
            return None;
        }

        let mut lines = Vec::with_capacity(entries.len() + 1);
        lines.push("Email,Date Subscribed,Source".to_string());
        for sub in &entries {
            lines.push(format!(
                "{},{},{}",
                sub.email,
                sub.subscribed_at.to_rfc3339(),
                sub.source
            ));
        }

        Some(CsvExport {
            filename: format!(
                "newsletter-subscriptions-{}.csv",
                Utc::now().format("%Y-%m-%d")
            ),
            content: lines.join("\n"),
        })
    }

    /// Empty the store. Irreversible.
    ///
    /// Refuses to act (returns `Ok(false)`) unless the caller passes the
    /// explicit confirmation through.
    pub fn clear_all(&self, confirmed: bool) -> Result<bool, StoreError> {
        if !confirmed {
            return Ok(false);
        }
        self.store.clear_all()?;
        self.refresh();
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use frostmart_newsletter::{EmailAddress, SignupSource};

    use crate::store::InMemorySubscriptionStore;

    fn seeded_store() -> Arc<InMemorySubscriptionStore> {
        let store = Arc::new(InMemorySubscriptionStore::new());
        store
            .add(Subscription::at(
                EmailAddress::parse("a@b.com").unwrap(),
                Utc.with_ymd_and_hms(2026, 8, 6, 9, 30, 0).unwrap(),
                SignupSource::footer(),
            ))
            .unwrap();
        store
            .add(Subscription::at(
                EmailAddress::parse("c@d.com").unwrap(),
                Utc.with_ymd_and_hms(2026, 8, 6, 10, 0, 0).unwrap(),
                SignupSource::new("email-test"),
            ))
            .unwrap();
        store
    }

    #[test]
    fn snapshot_tracks_the_store_only_on_refresh() {
        let store = seeded_store();
        let admin = AdminReadModel::new(store.clone() as Arc<dyn SubscriptionStore>);
        assert_eq!(admin.total(), 2);

        store
            .add(Subscription::new(
                EmailAddress::parse("e@f.com").unwrap(),
                SignupSource::footer(),
            ))
            .unwrap();

        // Stale until the next refresh.
        assert_eq!(admin.total(), 2);
        admin.refresh();
        assert_eq!(admin.total(), 3);
    }

    #[test]
    fn export_round_trips_the_three_fields() {
        let admin = AdminReadModel::new(seeded_store() as Arc<dyn SubscriptionStore>);

        let export = admin.export_csv().unwrap();
        let lines: Vec<&str> = export.content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Email,Date Subscribed,Source");

        let row: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(row, vec!["a@b.com", "2026-08-06T09:30:00+00:00", "footer"]);
        let row: Vec<&str> = lines[2].split(',').collect();
        assert_eq!(row, vec!["c@d.com", "2026-08-06T10:00:00+00:00", "email-test"]);

        assert!(export.filename.starts_with("newsletter-subscriptions-"));
        assert!(export.filename.ends_with(".csv"));
    }

    #[test]
    fn export_is_a_noop_on_an_empty_snapshot() {
        let store = Arc::new(InMemorySubscriptionStore::new());
        let admin = AdminReadModel::new(store as Arc<dyn SubscriptionStore>);
        assert!(admin.export_csv().is_none());
    }

    #[test]
    fn clear_all_requires_confirmation() {
        let store = seeded_store();
        let admin = AdminReadModel::new(store.clone() as Arc<dyn SubscriptionStore>);

        assert!(!admin.clear_all(false).unwrap());
        assert_eq!(store.list().len(), 2);

        assert!(admin.clear_all(true).unwrap());
        assert!(store.list().is_empty());
        assert_eq!(admin.total(), 0);
    }
}
