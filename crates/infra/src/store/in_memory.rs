use std::sync::RwLock;

use frostmart_newsletter::{EmailAddress, Subscription};

use super::{StoreError, SubscriptionStore};

/// In-memory subscription store.
///
/// Intended for tests/dev. The whole list sits behind one `RwLock`; `add`
/// re-checks for duplicates under the write lock, so the uniqueness
/// invariant holds under concurrent callers.
#[derive(Debug, Default)]
pub struct InMemorySubscriptionStore {
    entries: RwLock<Vec<Subscription>>,
}

impl InMemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SubscriptionStore for InMemorySubscriptionStore {
    fn list(&self) -> Vec<Subscription> {
        self.entries
            .read()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    fn exists(&self, email: &EmailAddress) -> Result<bool, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StoreError::Io("lock poisoned".to_string()))?;
        Ok(entries.iter().any(|s| &s.email == email))
    }

    fn add(&self, subscription: Subscription) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StoreError::Io("lock poisoned".to_string()))?;

        if entries.iter().any(|s| s.email == subscription.email) {
            return Err(StoreError::Duplicate(subscription.email));
        }

        entries.push(subscription);
        Ok(())
    }

    fn remove(&self, email: &EmailAddress) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StoreError::Io("lock poisoned".to_string()))?;
        entries.retain(|s| &s.email != email);
        Ok(())
    }

    fn clear_all(&self) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StoreError::Io("lock poisoned".to_string()))?;
        entries.clear();
        Ok(())
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
    fn add_then_list_preserves_insertion_order() {
        let store = InMemorySubscriptionStore::new();
        store.add(subscription("a@b.com")).unwrap();
        store.add(subscription("c@d.com")).unwrap();
        store.add(subscription("e@f.com")).unwrap();

        let listed: Vec<_> = store
            .list()
            .into_iter()
            .map(|s| s.email.as_str().to_string())
            .collect();
        assert_eq!(listed, vec!["a@b.com", "c@d.com", "e@f.com"]);
    }

    #[test]
    fn add_rejects_duplicate_email() {
        let store = InMemorySubscriptionStore::new();
        store.add(subscription("a@b.com")).unwrap();

        let err = store.add(subscription("a@b.com")).unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn exists_is_exact_match() {
        let store = InMemorySubscriptionStore::new();
        store.add(subscription("a@b.com")).unwrap();

        assert!(store.exists(&EmailAddress::parse("a@b.com").unwrap()).unwrap());
        // Case differs, so this is a different key.
        assert!(!store.exists(&EmailAddress::parse("A@b.com").unwrap()).unwrap());
    }

    #[test]
    fn remove_is_a_noop_for_missing_entries() {
        let store = InMemorySubscriptionStore::new();
        store.add(subscription("a@b.com")).unwrap();

        store
            .remove(&EmailAddress::parse("missing@x.com").unwrap())
            .unwrap();
        assert_eq!(store.list().len(), 1);

        store.remove(&EmailAddress::parse("a@b.com").unwrap()).unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn clear_all_empties_the_store() {
        let store = InMemorySubscriptionStore::new();
        store.add(subscription("a@b.com")).unwrap();
        store.add(subscription("c@d.com")).unwrap();

        store.clear_all().unwrap();
        assert!(store.list().is_empty());
        // The key is free again after clearing.
        store.add(subscription("a@b.com")).unwrap();
    }
}
