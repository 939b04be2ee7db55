//! Shared bearer credential handle.

use std::sync::{Arc, RwLock};

use tally_domain::Credential;

/// Explicit, cloneable credential context handed to API clients at construction.
///
/// Every clone observes the same slot, so a logout through one handle is seen
/// by the next request made through any other. A request that already took a
/// [`snapshot`](Self::snapshot) keeps the credential it captured.
#[derive(Debug, Clone, Default)]
pub struct CredentialContext {
    slot: Arc<RwLock<Option<Credential>>>,
}

impl CredentialContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        let context = Self::new();
        context.set(credential);
        context
    }

    pub fn set(&self, credential: Credential) {
        let mut guard = self.slot.write().unwrap_or_else(|err| err.into_inner());
        *guard = Some(credential);
    }

    pub fn clear(&self) {
        let mut guard = self.slot.write().unwrap_or_else(|err| err.into_inner());
        *guard = None;
    }

    pub fn is_present(&self) -> bool {
        self.slot
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or_else(|err| err.into_inner().is_some())
    }

    /// Captures the current credential for one outgoing request.
    pub fn snapshot(&self) -> Option<Credential> {
        self.slot
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_else(|err| err.into_inner().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_same_slot() {
        let context = CredentialContext::new();
        let other = context.clone();
        context.set(Credential::new("t1"));
        assert_eq!(other.snapshot().map(|c| c.token().to_string()), Some("t1".into()));

        other.clear();
        assert!(!context.is_present());
    }

    #[test]
    fn snapshot_survives_later_clear() {
        let context = CredentialContext::with_credential(Credential::new("captured"));
        let captured = context.snapshot();
        context.clear();
        assert_eq!(captured.map(|c| c.token().to_string()), Some("captured".into()));
        assert!(context.snapshot().is_none());
    }
}
