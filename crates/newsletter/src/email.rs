//! Subscriber email address value object.

use serde::{Deserialize, Serialize};

use frostmart_core::{DomainError, ValueObject};

/// A syntactically valid subscriber email address.
///
/// Validation is shape-only (`local@domain.tld`): no whitespace anywhere,
/// exactly one `@`, a non-empty local part, and a domain with an interior
/// dot. There is no network or DNS verification; an address that parses is
/// merely well-formed, not known to exist.
///
/// Comparison is exact and case-sensitive: the store keys subscriptions by
/// the address exactly as it was entered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parse a string into an address, rejecting anything that fails the
    /// shape check.
    pub fn parse(s: impl Into<String>) -> Result<Self, DomainError> {
        let s = s.into();
        if Self::is_valid(&s) {
            Ok(Self(s))
        } else {
            Err(DomainError::validation(format!(
                "'{s}' is not a valid email address"
            )))
        }
    }

    /// Shape check without constructing the value object.
    pub fn is_valid(s: &str) -> bool {
        if s.chars().any(char::is_whitespace) {
            return false;
        }
        let Some((local, domain)) = s.split_once('@') else {
            return false;
        };
        if local.is_empty() || domain.contains('@') {
            return false;
        }
        // The domain needs a dot that is neither its first nor last character.
        domain
            .char_indices()
            .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before the `@`, used as a display-name fallback in outbound
    /// messages.
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or(&self.0)
    }
}

impl ValueObject for EmailAddress {}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
