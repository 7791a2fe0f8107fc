//! External identity assertion types.
//!
//! The OAuth exchange itself happens outside this workspace. What reaches
//! the session service is the already-verified identity the provider
//! asserted, carried as a plain value.

use serde::{Deserialize, Serialize};

use crate::types::email::Email;

/// A verified identity assertion from an external OAuth provider.
///
/// The session service trusts this value as already authenticated; its only
/// job is to upsert a local account from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthAssertion {
    /// Provider label (e.g., "google").
    pub provider: String,
    /// Provider-scoped stable subject identifier.
    pub subject: String,
    /// Verified email address reported by the provider.
    pub email: Email,
    /// Display name reported by the provider.
    pub name: String,
    /// Avatar image URL, if the provider supplied one.
    pub avatar_url: Option<String>,
}

impl OAuthAssertion {
    /// Create a new assertion.
    #[must_use]
    pub fn new(
        provider: impl Into<String>,
        subject: impl Into<String>,
        email: Email,
        name: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            subject: subject.into(),
            email,
            name: name.into(),
            avatar_url: None,
        }
    }

    /// Attach an avatar URL.
    #[must_use]
    pub fn with_avatar(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }
}
