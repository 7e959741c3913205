//! Outbound dispatch for successful signups.
//!
//! A signup produces two messages: a confirmation to the subscriber and a
//! notice to the operator. Only the confirmation decides the dispatch
//! outcome. The operator notice runs as a detached task; its failure is
//! logged at the observability boundary and never reaches the signup flow.

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use frostmart_newsletter::Subscription;

use crate::gateway::{GatewayError, NotificationGateway};

/// Primary dispatch failure.
///
/// The dispatcher does not retry the primary gateway; the caller decides the
/// fallback.
#[derive(Debug, Error)]
#[error("confirmation dispatch failed: {source}")]
pub struct DispatchError {
    #[from]
    source: GatewayError,
}

#[derive(Clone)]
pub struct Dispatcher {
    gateway: Arc<dyn NotificationGateway>,
}

impl Dispatcher {
    pub fn new(gateway: Arc<dyn NotificationGateway>) -> Self {
        Self { gateway }
    }

    /// Send the subscriber confirmation, then kick off the operator notice.
    pub async fn send_confirmation(&self, subscription: &Subscription) -> Result<(), DispatchError> {
        self.gateway.send_confirmation(subscription).await?;

        // Fire-and-forget: the signup flow does not wait on the notice.
        let gateway = Arc::clone(&self.gateway);
        let subscription = subscription.clone();
        tokio::spawn(async move {
            if let Err(err) = gateway.send_operator_notice(&subscription).await {
                warn!(
                    email = %subscription.email,
                    error = %err,
                    "operator notice failed; subscription is unaffected"
                );
            }
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use frostmart_newsletter::{EmailAddress, SignupSource};

    /// Records calls; each leg can be told to fail.
    #[derive(Debug, Default)]
    struct RecordingGateway {
        fail_confirmation: AtomicBool,
        fail_notice: AtomicBool,
        confirmations: Mutex<Vec<String>>,
        notices: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl NotificationGateway for RecordingGateway {
        async fn send_confirmation(
            &self,
            subscription: &Subscription,
        ) -> Result<(), GatewayError> {
            if self.fail_confirmation.load(Ordering::SeqCst) {
                return Err(GatewayError::Rejected("forced failure".to_string()));
            }
            self.confirmations
                .lock()
                .unwrap()
                .push(subscription.email.as_str().to_string());
            Ok(())
        }

        async fn send_operator_notice(
            &self,
            subscription: &Subscription,
        ) -> Result<(), GatewayError> {
            if self.fail_notice.load(Ordering::SeqCst) {
                return Err(GatewayError::Rejected("forced failure".to_string()));
            }
            self.notices
                .lock()
                .unwrap()
                .push(subscription.email.as_str().to_string());
            Ok(())
        }
    }

    fn subscription() -> Subscription {
        Subscription::new(
            EmailAddress::parse("a@b.com").unwrap(),
            SignupSource::footer(),
        )
    }

    async fn eventually(check: impl Fn() -> bool) -> bool {
        for _ in 0..100 {
            if check() {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }

    #[tokio::test]
    async fn successful_confirmation_also_sends_the_operator_notice() {
        let gateway = Arc::new(RecordingGateway::default());
        let dispatcher = Dispatcher::new(gateway.clone());

        dispatcher.send_confirmation(&subscription()).await.unwrap();

        assert_eq!(gateway.confirmations.lock().unwrap().len(), 1);
        // The notice runs detached; wait for it to land.
        assert!(eventually(|| gateway.notices.lock().unwrap().len() == 1).await);
    }

    #[tokio::test]
    async fn failed_confirmation_is_an_error_and_skips_the_notice() {
        let gateway = Arc::new(RecordingGateway::default());
        gateway.fail_confirmation.store(true, Ordering::SeqCst);
        let dispatcher = Dispatcher::new(gateway.clone());

        let err = dispatcher.send_confirmation(&subscription()).await;
        assert!(err.is_err());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(gateway.notices.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn notice_failure_never_propagates() {
        let gateway = Arc::new(RecordingGateway::default());
        gateway.fail_notice.store(true, Ordering::SeqCst);
        let dispatcher = Dispatcher::new(gateway.clone());

        dispatcher.send_confirmation(&subscription()).await.unwrap();
        assert_eq!(gateway.confirmations.lock().unwrap().len(), 1);
    }
}
