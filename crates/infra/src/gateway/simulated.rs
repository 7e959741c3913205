//! Simulated gateway: logs instead of sending.
//!
//! Stand-in dispatch path that always succeeds. The subscription flow falls
//! back to it when the primary gateway fails, so a signup never blocks on
//! delivery; the "send" is a structured log entry.

use async_trait::async_trait;
use tracing::info;

use frostmart_newsletter::Subscription;

use super::{GatewayError, NotificationGateway};

#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedGateway;

impl SimulatedGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationGateway for SimulatedGateway {
    async fn send_confirmation(&self, subscription: &Subscription) -> Result<(), GatewayError> {
        info!(
            email = %subscription.email,
            source = %subscription.source,
            "simulated confirmation email (nothing was sent)"
        );
        Ok(())
    }

    async fn send_operator_notice(&self, subscription: &Subscription) -> Result<(), GatewayError> {
        info!(
            email = %subscription.email,
            source = %subscription.source,
            "simulated operator notice (nothing was sent)"
        );
        Ok(())
    }
}
