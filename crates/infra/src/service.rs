//! Subscription orchestration.
//!
//! `SubscriptionService` is the only entry point UI surfaces call:
//! validate, duplicate-check, persist, then best-effort dispatch with a
//! simulated fallback. Success is reported once persistence has succeeded;
//! dispatch failures never reach the caller.

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use frostmart_newsletter::{EmailAddress, SignupSource, Subscription};

use crate::dispatcher::Dispatcher;
use crate::gateway::{NotificationGateway, SimulatedGateway};
use crate::store::{StoreError, SubscriptionStore};

/// User-facing subscription failure.
#[derive(Debug, Error)]
pub enum SubscribeError {
    /// The input fails the syntactic email check. No side effects.
    #[error("please enter a valid email address")]
    InvalidEmail,

    /// The email is already subscribed. No side effects.
    #[error("this email is already subscribed")]
    DuplicateEmail,

    /// The persisted store was unreadable/unwritable; nothing was recorded.
    #[error("subscription storage failed: {0}")]
    Storage(String),
}

impl From<StoreError> for SubscribeError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Duplicate(_) => SubscribeError::DuplicateEmail,
            StoreError::Io(msg) | StoreError::Serialize(msg) => SubscribeError::Storage(msg),
        }
    }
}

pub struct SubscriptionService {
    store: Arc<dyn SubscriptionStore>,
    dispatcher: Dispatcher,
    fallback: SimulatedGateway,
}

impl SubscriptionService {
    pub fn new(store: Arc<dyn SubscriptionStore>, dispatcher: Dispatcher) -> Self {
        Self {
            store,
            dispatcher,
            fallback: SimulatedGateway::new(),
        }
    }

    /// Record a signup and trigger the confirmation dispatch.
    ///
    /// The returned subscription is persisted before any dispatch is
    /// attempted; a dispatch failure degrades to the simulated send and the
    /// call still succeeds.
    pub async fn subscribe(
        &self,
        email: &str,
        source: SignupSource,
    ) -> Result<Subscription, SubscribeError> {
        let email = EmailAddress::parse(email).map_err(|_| SubscribeError::InvalidEmail)?;

        if self.store.exists(&email)? {
            return Err(SubscribeError::DuplicateEmail);
        }

        let subscription = Subscription::new(email, source);
        // A racing writer is caught here: `add` re-checks under its lock.
        self.store.add(subscription.clone())?;

        if let Err(err) = self.dispatcher.send_confirmation(&subscription).await {
            warn!(
                email = %subscription.email,
                error = %err,
                "confirmation dispatch failed; falling back to simulated send"
            );
            // The fallback cannot fail; it only logs.
            let _ = self.fallback.send_confirmation(&subscription).await;
        }

        Ok(subscription)
    }

    /// Remove a subscription if present.
    pub async fn unsubscribe(&self, email: &str) -> Result<(), SubscribeError> {
        let email = EmailAddress::parse(email).map_err(|_| SubscribeError::InvalidEmail)?;
        self.store.remove(&email)?;
        Ok(())
    }
}
