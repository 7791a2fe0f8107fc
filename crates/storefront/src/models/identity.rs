//! Identity types.
//!
//! The authenticated principal, persisted verbatim as the session record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use artvista_core::{Email, Phone, Role, UserId};

/// An authenticated account.
///
/// Exactly one identity is current at a time, or none (anonymous). An
/// identity always carries at least one contact point; the constructors
/// enforce that, and [`Identity::has_contact`] re-checks records coming
/// back from storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    /// Opaque account id.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address, if one is bound.
    pub email: Option<Email>,
    /// Phone number, if one is bound.
    pub phone: Option<Phone>,
    /// Account role, fixed at creation.
    pub role: Role,
    /// Avatar image URL.
    pub avatar_url: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl Identity {
    /// Create an email-based identity.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>, email: Email, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            email: Some(email),
            phone: None,
            role,
            avatar_url: None,
            created_at: Utc::now(),
        }
    }

    /// Bind a phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: Phone) -> Self {
        self.phone = Some(phone);
        self
    }

    /// Attach an avatar URL.
    #[must_use]
    pub fn with_avatar(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }

    /// Backdate the creation timestamp (seed data).
    #[must_use]
    pub fn created(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self
    }

    /// Whether the record carries at least one contact point.
    ///
    /// Deserialized records can violate this; such a record is treated as
    /// corrupt by the session restore path.
    #[must_use]
    pub const fn has_contact(&self) -> bool {
        self.email.is_some() || self.phone.is_some()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity::new(
            UserId::new("1"),
            "Mara Ellison",
            Email::parse("mara@artvista.app").unwrap(),
            Role::Artist,
        )
    }

    #[test]
    fn test_constructor_sets_contact() {
        let identity = identity();
        assert!(identity.has_contact());
        assert!(identity.phone.is_none());
    }

    #[test]
    fn test_with_phone_and_avatar() {
        let identity = identity()
            .with_phone(Phone::parse("+15550101").unwrap())
            .with_avatar("https://images.example.com/mara.jpg");
        assert!(identity.phone.is_some());
        assert!(identity.avatar_url.is_some());
    }

    #[test]
    fn test_serde_roundtrip() {
        let identity = identity().with_phone(Phone::parse("+15550101").unwrap());
        let json = serde_json::to_string(&identity).unwrap();
        let parsed: Identity = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, identity);
    }

    #[test]
    fn test_contactless_record_detected() {
        // A hand-edited or corrupted record can drop both contact points.
        let json = r#"{
            "id": "1",
            "name": "Nobody",
            "email": null,
            "phone": null,
            "role": "buyer",
            "avatar_url": null,
            "created_at": "2024-03-14T09:00:00Z"
        }"#;
        let parsed: Identity = serde_json::from_str(json).unwrap();
        assert!(!parsed.has_contact());
    }
}
