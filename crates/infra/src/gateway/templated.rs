//! Templated-mail gateway (secondary).
//!
//! Structured send call against an email-template service: the request is
//! keyed by a service identifier, a template identifier, and a public-key
//! credential, and carries named template parameters. This path is usable
//! independently (the diagnostics surface drives it); the default
//! subscription flow does not fall back to it automatically.

use async_trait::async_trait;
use serde::Serialize;

use frostmart_newsletter::Subscription;

use super::{GatewayError, NotificationGateway};

/// Template service identifiers and message identity settings.
#[derive(Debug, Clone)]
pub struct TemplatedMailConfig {
    /// Send endpoint, e.g. `https://api.emailjs.com/api/v1.0/email/send`.
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    /// Public-key credential for the service account.
    pub public_key: String,
    /// Identity woven into the rendered template.
    pub company_name: String,
    pub website: String,
    /// Recipient of operator notices.
    pub operator_email: String,
}

#[derive(Debug, Clone)]
pub struct TemplatedMailGateway {
    client: reqwest::Client,
    config: TemplatedMailConfig,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

#[derive(Debug, Serialize)]
struct TemplateParams<'a> {
    to_email: &'a str,
    to_name: &'a str,
    from_name: &'a str,
    subject: &'a str,
    message: &'a str,
    company_name: &'a str,
    website: &'a str,
    unsubscribe_link: &'a str,
}

impl TemplatedMailGateway {
    pub fn new(config: TemplatedMailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn send(
        &self,
        to_email: &str,
        to_name: &str,
        subject: &str,
        message: &str,
    ) -> Result<(), GatewayError> {
        let unsubscribe_link = format!("{}/unsubscribe", self.config.website);
        let request = SendRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: TemplateParams {
                to_email,
                to_name,
                from_name: &self.config.company_name,
                subject,
                message,
                company_name: &self.config.company_name,
                website: &self.config.website,
                unsubscribe_link: &unsubscribe_link,
            },
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let detail = response.text().await.unwrap_or_default();
        Err(match status.as_u16() {
            // The service reports bad service/template ids as 400.
            400 => GatewayError::Configuration(detail),
            401 => GatewayError::Authentication(detail),
            404 => GatewayError::NotFound(detail),
            _ => GatewayError::Rejected(format!("status {status}: {detail}")),
        })
    }

    fn confirmation_message(&self) -> String {
        format!(
            "Thank you for subscribing to our newsletter!\n\n\
             You'll now receive updates on new products, special offers, and \
             launch announcements.\n\n\
             We're excited to have you on board!\n\n\
             Best regards,\n\
             The {} Team",
            self.config.company_name,
        )
    }
}

#[async_trait]
impl NotificationGateway for TemplatedMailGateway {
    async fn send_confirmation(&self, subscription: &Subscription) -> Result<(), GatewayError> {
        self.send(
            subscription.email.as_str(),
            subscription.email.local_part(),
            &format!("Welcome to the {} newsletter!", self.config.company_name),
            &self.confirmation_message(),
        )
        .await
    }

    async fn send_operator_notice(&self, subscription: &Subscription) -> Result<(), GatewayError> {
        let message = format!(
            "New newsletter subscription\n\n\
             Email: {email}\n\
             Time: {time}\n\
             Source: {source}",
            email = subscription.email,
            time = subscription.subscribed_at.to_rfc3339(),
            source = subscription.source,
        );
        self.send(
            &self.config.operator_email,
            &self.config.company_name,
            "New newsletter subscription",
            &message,
        )
        .await
    }
}
