//! Outbound notification gateways.
//!
//! The subscription flow talks to one `NotificationGateway` capability.
//! Concrete variants - the form relay, the templated mail service, and the
//! simulated stand-in - are selected by configuration, so the orchestrator
//! stays gateway-agnostic and tests can substitute a fake.

mod form_relay;
mod simulated;
mod templated;

pub use form_relay::{FormRelayConfig, FormRelayGateway};
pub use simulated::SimulatedGateway;
pub use templated::{TemplatedMailConfig, TemplatedMailGateway};

use async_trait::async_trait;
use thiserror::Error;

use frostmart_newsletter::Subscription;

/// Gateway operation error.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never completed (connect or transport failure).
    #[error("transport: {0}")]
    Transport(String),

    /// The gateway answered but refused the submission.
    #[error("rejected by gateway: {0}")]
    Rejected(String),

    /// The request does not name a valid service/template configuration.
    #[error("gateway configuration: {0}")]
    Configuration(String),

    /// The credential was rejected.
    #[error("gateway authentication: {0}")]
    Authentication(String),

    /// The addressed service or template does not exist.
    #[error("gateway resource not found: {0}")]
    NotFound(String),
}

/// Capability for sending the two per-signup messages.
///
/// Implementations must not retry internally; retry/fallback strategy
/// belongs to the caller.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    /// Subscriber-facing confirmation message.
    async fn send_confirmation(&self, subscription: &Subscription) -> Result<(), GatewayError>;

    /// Operator-facing notice that a signup happened.
    async fn send_operator_notice(&self, subscription: &Subscription) -> Result<(), GatewayError>;
}
