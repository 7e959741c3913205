//! Newsletter subscription record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use frostmart_core::ValueObject;

use crate::email::EmailAddress;

/// Free-form tag identifying the surface a signup came from (e.g. `"footer"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignupSource(String);

impl SignupSource {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Default surface for forms that do not say where they live.
    pub fn footer() -> Self {
        Self("footer".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for SignupSource {}

impl core::fmt::Display for SignupSource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// One newsletter signup.
///
/// `email` is the unique key (exact, case-sensitive match as stored).
/// `subscribed_at` is assigned once at creation and never mutated; it is
/// persisted as an ISO-8601 string under the `timestamp` field of the
/// serialized blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub email: EmailAddress,
    #[serde(rename = "timestamp")]
    pub subscribed_at: DateTime<Utc>,
    pub source: SignupSource,
}

impl Subscription {
    /// Create a subscription stamped with the current time.
    pub fn new(email: EmailAddress, source: SignupSource) -> Self {
        Self::at(email, Utc::now(), source)
    }

    /// Create a subscription with an explicit timestamp. Prefer this in tests
    /// for determinism.
    pub fn at(email: EmailAddress, subscribed_at: DateTime<Utc>, source: SignupSource) -> Self {
        Self {
            email,
            subscribed_at,
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_email() -> EmailAddress {
        EmailAddress::parse("a@b.com").unwrap()
    }

    #[test]
    fn serializes_with_the_persisted_field_names() {
        let subscribed_at = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();
        let subscription = Subscription::at(test_email(), subscribed_at, SignupSource::footer());

        let json = serde_json::to_value(&subscription).unwrap();
        assert_eq!(json["email"], "a@b.com");
        assert_eq!(json["source"], "footer");
        // The stored blob uses `timestamp`, not the Rust field name.
        assert!(json.get("timestamp").is_some());
        assert!(json.get("subscribed_at").is_none());
    }

    #[test]
    fn round_trips_through_json() {
        let subscription = Subscription::at(
            test_email(),
            Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap(),
            SignupSource::new("hero-banner"),
        );
        let json = serde_json::to_string(&subscription).unwrap();
        let back: Subscription = serde_json::from_str(&json).unwrap();
        assert_eq!(back, subscription);
    }

    #[test]
    fn default_source_is_footer() {
        assert_eq!(SignupSource::footer().as_str(), "footer");
    }
}
