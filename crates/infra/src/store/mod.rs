//! Subscription persistence.
//!
//! The subscription list is the only shared mutable resource in the system,
//! so it is owned by a single repository object behind this trait. All
//! implementations serialize the duplicate check and the append under one
//! lock: uniqueness holds even when two surfaces try to add the same email
//! at the same time.

mod in_memory;
mod json_file;

pub use in_memory::InMemorySubscriptionStore;
pub use json_file::JsonFileSubscriptionStore;

use std::sync::Arc;

use thiserror::Error;

use frostmart_newsletter::{EmailAddress, Subscription};

/// Store operation error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The email is already present (uniqueness invariant).
    #[error("already subscribed: {0}")]
    Duplicate(EmailAddress),

    /// The underlying storage was unreadable/unwritable.
    #[error("storage io: {0}")]
    Io(String),

    /// The subscription list could not be (de)serialized.
    #[error("storage serialization: {0}")]
    Serialize(String),
}

/// Durable, append-ordered list of subscriptions keyed by email.
///
/// Ordering reflects subscription order; it is used for display/export only,
/// never for correctness. Reads are forgiving (missing or corrupt data is an
/// empty list), writes are not.
pub trait SubscriptionStore: Send + Sync {
    /// All current subscriptions in insertion order.
    ///
    /// Never fails: missing or corrupt data reads as an empty list.
    fn list(&self) -> Vec<Subscription>;

    /// Exact-match membership test.
    fn exists(&self, email: &EmailAddress) -> Result<bool, StoreError>;

    /// Append a subscription.
    ///
    /// Fails with [`StoreError::Duplicate`] if the email is already present.
    /// The duplicate check and the append happen under one lock; a concurrent
    /// writer cannot interleave between them.
    fn add(&self, subscription: Subscription) -> Result<(), StoreError>;

    /// Remove the matching entry if present; no-op otherwise.
    fn remove(&self, email: &EmailAddress) -> Result<(), StoreError>;

    /// Empty the store unconditionally.
    fn clear_all(&self) -> Result<(), StoreError>;
}

impl<S> SubscriptionStore for Arc<S>
where
    S: SubscriptionStore + ?Sized,
{
    fn list(&self) -> Vec<Subscription> {
        (**self).list()
    }

    fn exists(&self, email: &EmailAddress) -> Result<bool, StoreError> {
        (**self).exists(email)
    }

    fn add(&self, subscription: Subscription) -> Result<(), StoreError> {
        (**self).add(subscription)
    }

    fn remove(&self, email: &EmailAddress) -> Result<(), StoreError> {
        (**self).remove(email)
    }

    fn clear_all(&self) -> Result<(), StoreError> {
        (**self).clear_all()
    }
}
