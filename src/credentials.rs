//! Credential gate
//!
//! The orchestrator never fetches without a usable credential - an
//! unauthenticated attempt is guaranteed to fail and would waste both the
//! retry budget and the host's execution-time budget. The credential itself
//! lives in an external store; the core only reads presence and validity.

use std::sync::Arc;

use crate::cache::now_millis;

/// Opaque access credential with an optional expiration instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialToken {
    token: String,
    expires_at_millis: Option<u64>,
}

impl CredentialToken {
    /// Create a token that never expires
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            expires_at_millis: None,
        }
    }

    /// Create a token with an expiration instant (milliseconds since epoch)
    #[must_use]
    pub fn with_expiry(token: impl Into<String>, expires_at_millis: u64) -> Self {
        Self {
            token: token.into(),
            expires_at_millis: Some(expires_at_millis),
        }
    }

    /// The raw token value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// Check whether the token has expired as of `now_millis`
    #[must_use]
    pub fn is_expired(&self, now_millis: u64) -> bool {
        match self.expires_at_millis {
            Some(expiry) => now_millis >= expiry,
            None => false,
        }
    }
}

/// External credential store contract
///
/// Synchronous from the orchestrator's perspective: the store either has a
/// token loaded or it does not. Loading failures are indistinguishable from
/// absence on purpose - both mean "do not attempt a fetch".
pub trait CredentialStore: Send + Sync {
    /// The stored token, if any
    fn current_token(&self) -> Option<CredentialToken>;
}

/// Resolve the gate: a usable (present and unexpired) token, or nothing
///
/// An expired token is treated exactly as an absent one.
#[must_use]
pub fn check_credential(store: &dyn CredentialStore) -> Option<CredentialToken> {
    let token = store.current_token()?;
    if token.is_expired(now_millis()) {
        tracing::debug!("stored credential has expired, treating as absent");
        return None;
    }
    Some(token)
}

/// Fixed-token store for hosts that manage the credential themselves
/// (and for deterministic tests)
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialStore {
    token: Option<CredentialToken>,
}

impl StaticCredentialStore {
    /// Store holding the given token
    #[must_use]
    pub fn new(token: CredentialToken) -> Self {
        Self { token: Some(token) }
    }

    /// Store with no credential
    #[must_use]
    pub fn unauthenticated() -> Self {
        Self { token: None }
    }
}

impl CredentialStore for StaticCredentialStore {
    fn current_token(&self) -> Option<CredentialToken> {
        self.token.clone()
    }
}

impl<T: CredentialStore + ?Sized> CredentialStore for Arc<T> {
    fn current_token(&self) -> Option<CredentialToken> {
        (**self).current_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_without_expiry_never_expires() {
        let token = CredentialToken::new("abc");
        assert!(!token.is_expired(0));
        assert!(!token.is_expired(u64::MAX));
        assert_eq!(token.as_str(), "abc");
    }

    #[test]
    fn test_token_expiry_boundary() {
        let token = CredentialToken::with_expiry("abc", 1000);
        assert!(!token.is_expired(999));
        // At the expiry instant the token is no longer usable
        assert!(token.is_expired(1000));
        assert!(token.is_expired(1001));
    }

    #[test]
    fn test_gate_absent_credential() {
        let store = StaticCredentialStore::unauthenticated();
        assert!(check_credential(&store).is_none());
    }

    #[test]
    fn test_gate_present_credential() {
        let store = StaticCredentialStore::new(CredentialToken::new("abc"));
        let token = check_credential(&store).unwrap();
        assert_eq!(token.as_str(), "abc");
    }

    #[test]
    fn test_gate_expired_credential_is_absent() {
        // Expiry far in the past relative to the real clock
        let store = StaticCredentialStore::new(CredentialToken::with_expiry("abc", 1));
        assert!(check_credential(&store).is_none());
    }

    #[test]
    fn test_gate_unexpired_credential_passes() {
        let far_future = now_millis() + 60 * 60 * 1000;
        let store = StaticCredentialStore::new(CredentialToken::with_expiry("abc", far_future));
        assert!(check_credential(&store).is_some());
    }
}
