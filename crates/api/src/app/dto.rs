use serde::Serialize;

use frostmart_newsletter::Subscription;

// -------------------------
// Response DTOs
// -------------------------

/// JSON rendering of one subscription.
#[derive(Debug, Serialize)]
pub struct SubscriptionView {
    pub email: String,
    pub subscribed_at: String,
    pub source: String,
}

impl From<&Subscription> for SubscriptionView {
    fn from(value: &Subscription) -> Self {
        Self {
            email: value.email.as_str().to_string(),
            subscribed_at: value.subscribed_at.to_rfc3339(),
            source: value.source.as_str().to_string(),
        }
    }
}
