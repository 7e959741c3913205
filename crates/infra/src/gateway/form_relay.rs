//! Form-relay gateway (primary).
//!
//! Submits form-encoded messages to a public HTTP relay that forwards them
//! as outbound email. A signup produces two independent submissions against
//! the same endpoint: a confirmation to the subscriber and a notice to the
//! operator, differing only in recipient and body.

use async_trait::async_trait;
use serde::Deserialize;

use frostmart_newsletter::Subscription;

use super::{GatewayError, NotificationGateway};

/// Relay endpoint and message identity settings.
#[derive(Debug, Clone)]
pub struct FormRelayConfig {
    /// Submission endpoint, e.g. `https://api.web3forms.com/submit`.
    pub endpoint: String,
    /// Access credential issued by the relay.
    pub access_key: String,
    /// Sender identity stamped on outbound messages.
    pub sender_name: String,
    pub sender_email: String,
    /// Recipient of operator notices.
    pub operator_email: String,
    /// Storefront URL, used in message bodies and as the post-submit redirect.
    pub site_url: String,
}

#[derive(Debug, Clone)]
pub struct FormRelayGateway {
    client: reqwest::Client,
    config: FormRelayConfig,
}

/// Body the relay answers with, on both accepted and refused submissions.
#[derive(Debug, Deserialize)]
struct RelayResponse {
    success: bool,
    #[serde(default)]
    message: String,
}

impl FormRelayGateway {
    pub fn new(config: FormRelayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn submit(
        &self,
        subject: &str,
        from_name: &str,
        to_email: &str,
        message: &str,
        replyto: &str,
    ) -> Result<(), GatewayError> {
        let form = [
            ("access_key", self.config.access_key.as_str()),
            ("subject", subject),
            ("from_name", from_name),
            ("from_email", self.config.sender_email.as_str()),
            ("to_email", to_email),
            ("message", message),
            ("redirect", self.config.site_url.as_str()),
            ("replyto", replyto),
        ];

        let response = self
            .client
            .post(&self.config.endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Rejected(format!("status {status}")));
        }

        let body: RelayResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Rejected(format!("unreadable relay response: {e}")))?;

        if !body.success {
            let detail = if body.message.is_empty() {
                "relay reported failure".to_string()
            } else {
                body.message
            };
            return Err(GatewayError::Rejected(detail));
        }

        Ok(())
    }

    fn confirmation_body(&self) -> String {
        format!(
            "Hi there!\n\n\
             Thank you for subscribing to the {name} newsletter!\n\n\
             You'll now receive:\n\
             - Updates on new flavors and products\n\
             - Special offers and exclusive discounts\n\
             - Product launch announcements\n\n\
             We're excited to have you on board!\n\n\
             Best regards,\n\
             The {name} Team\n\n\
             Website: {site}\n\n\
             ---\n\
             If you didn't subscribe to this newsletter, please ignore this email.",
            name = self.config.sender_name,
            site = self.config.site_url,
        )
    }

    fn operator_body(&self, subscription: &Subscription) -> String {
        format!(
            "New newsletter subscription\n\n\
             Email: {email}\n\
             Time: {time}\n\
             Source: {source}\n\
             Site: {site}\n\n\
             The subscriber has been sent a confirmation email automatically.",
            email = subscription.email,
            time = subscription.subscribed_at.to_rfc3339(),
            source = subscription.source,
            site = self.config.site_url,
        )
    }
}

#[async_trait]
impl NotificationGateway for FormRelayGateway {
    async fn send_confirmation(&self, subscription: &Subscription) -> Result<(), GatewayError> {
        self.submit(
            &format!("Welcome to the {} newsletter!", self.config.sender_name),
            &self.config.sender_name,
            subscription.email.as_str(),
            &self.confirmation_body(),
            &self.config.sender_email,
        )
        .await
    }

    async fn send_operator_notice(&self, subscription: &Subscription) -> Result<(), GatewayError> {
        self.submit(
            "New newsletter subscription",
            &format!("{} Website", self.config.sender_name),
            &self.config.operator_email,
            &self.operator_body(subscription),
            subscription.email.as_str(),
        )
        .await
    }
}
