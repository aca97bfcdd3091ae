//! Token pair model

use std::fmt;

/// Access and refresh credentials held together
///
/// Either slot may be absent independently. A missing refresh token means
/// the session cannot be renewed.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TokenPair {
    /// Short-lived credential sent with every authenticated request
    pub access: Option<String>,
    /// Long-lived credential exchanged for a new pair
    pub refresh: Option<String>,
}

impl TokenPair {
    /// Build a pair from optional slots
    pub fn new(access: Option<String>, refresh: Option<String>) -> Self {
        Self { access, refresh }
    }

    /// Both slots absent
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.access.is_none() && self.refresh.is_none()
    }

    /// Access token, treating an empty string as absent
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        self.access.as_deref().filter(|token| !token.is_empty())
    }

    /// Refresh token, treating an empty string as absent
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh.as_deref().filter(|token| !token.is_empty())
    }
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |slot: &Option<String>| if slot.is_some() { "[REDACTED]" } else { "None" };
        f.debug_struct("TokenPair")
            .field("access", &redact(&self.access))
            .field("refresh", &redact(&self.refresh))
            .finish()
    }
}
