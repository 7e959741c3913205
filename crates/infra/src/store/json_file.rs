use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use frostmart_newsletter::{EmailAddress, Subscription};

use super::{StoreError, SubscriptionStore};

const STORE_FILE: &str = "newsletter_subscriptions.json";

/// JSON-file-backed subscription store.
///
/// All entries live under one file as a serialized list - the single
/// persisted key of the system. Reads treat a missing or corrupt file as an
/// empty list; writes rewrite the whole blob through a temp file + rename so
/// a crash mid-write cannot leave a half-written list behind. A mutex
/// serializes every read-modify-write, keeping `add` atomic with respect to
/// its duplicate check.
#[derive(Debug)]
pub struct JsonFileSubscriptionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileSubscriptionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Store under the well-known file name inside `data_dir`.
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join(STORE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Vec<Subscription> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }

    fn write_entries(&self, entries: &[Subscription]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::Io(format!("create {}: {e}", parent.display())))?;
        }

        let raw = serde_json::to_string_pretty(entries)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw).map_err(|e| StoreError::Io(format!("write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| StoreError::Io(format!("rename into {}: {e}", self.path.display())))?;

        Ok(())
    }

    fn locked(&self) -> Result<std::sync::MutexGuard<'_, ()>, StoreError> {
        self.lock
            .lock()
            .map_err(|_| StoreError::Io("lock poisoned".to_string()))
    }
}

impl SubscriptionStore for JsonFileSubscriptionStore {
    fn list(&self) -> Vec<Subscription> {
        let Ok(_guard) = self.lock.lock() else {
            return Vec::new();
        };
        self.read_entries()
    }

    fn exists(&self, email: &EmailAddress) -> Result<bool, StoreError> {
        let _guard = self.locked()?;
        Ok(self.read_entries().iter().any(|s| &s.email == email))
    }

    fn add(&self, subscription: Subscription) -> Result<(), StoreError> {
        let _guard = self.locked()?;

        let mut entries = self.read_entries();
        if entries.iter().any(|s| s.email == subscription.email) {
            return Err(StoreError::Duplicate(subscription.email));
        }

        entries.push(subscription);
        self.write_entries(&entries)
    }

    fn remove(&self, email: &EmailAddress) -> Result<(), StoreError> {
        let _guard = self.locked()?;

        let mut entries = self.read_entries();
        let before = entries.len();
        entries.retain(|s| &s.email != email);
        if entries.len() == before {
            return Ok(());
        }
        self.write_entries(&entries)
    }

    fn clear_all(&self) -> Result<(), StoreError> {
        let _guard = self.locked()?;
        self.write_entries(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frostmart_newsletter::SignupSource;

    fn subscription(email: &str) -> Subscription {
        Subscription::new(
            EmailAddress::parse(email).unwrap(),
            SignupSource::footer(),
        )
    }

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();

        {
            let store = JsonFileSubscriptionStore::in_dir(dir.path());
            store.add(subscription("a@b.com")).unwrap();
            store.add(subscription("c@d.com")).unwrap();
        }

        let reopened = JsonFileSubscriptionStore::in_dir(dir.path());
        let listed: Vec<_> = reopened
            .list()
            .into_iter()
            .map(|s| s.email.as_str().to_string())
            .collect();
        assert_eq!(listed, vec!["a@b.com", "c@d.com"]);
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSubscriptionStore::in_dir(dir.path());
        assert!(store.list().is_empty());
        assert!(!store.exists(&EmailAddress::parse("a@b.com").unwrap()).unwrap());
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSubscriptionStore::in_dir(dir.path());
        fs::write(store.path(), "{not valid json").unwrap();

        assert!(store.list().is_empty());

        // The store recovers on the next write.
        store.add(subscription("a@b.com")).unwrap();
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn duplicate_check_spans_instances_on_the_same_file() {
        let dir = tempfile::tempdir().unwrap();
        let first = JsonFileSubscriptionStore::in_dir(dir.path());
        first.add(subscription("a@b.com")).unwrap();

        let second = JsonFileSubscriptionStore::in_dir(dir.path());
        let err = second.add(subscription("a@b.com")).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[test]
    fn clear_all_then_resubscribe() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSubscriptionStore::in_dir(dir.path());
        store.add(subscription("a@b.com")).unwrap();

        store.clear_all().unwrap();
        assert!(store.list().is_empty());
        store.add(subscription("a@b.com")).unwrap();
        assert_eq!(store.list().len(), 1);
    }
}
