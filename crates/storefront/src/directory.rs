//! In-memory account registry.
//!
//! The mock stand-in for a user database: a seeded list of accounts plus
//! whatever signs up at runtime. Lookups are the only queries the session
//! service needs - by email (case-insensitive) and by phone.

use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};
use thiserror::Error;
use uuid::Uuid;

use artvista_core::{Email, Phone, Role, UserId};

use crate::models::Identity;

/// Errors that can occur when registering an account.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Another account already holds this email address.
    #[error("an account with this email already exists")]
    EmailTaken,

    /// Another account already holds this phone number.
    #[error("an account with this phone number already exists")]
    PhoneTaken,
}

/// Registry of known accounts.
pub struct UserDirectory {
    users: Mutex<Vec<Identity>>,
}

impl UserDirectory {
    /// A directory with no accounts.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
        }
    }

    /// The directory shipped with the demo accounts.
    #[must_use]
    pub fn with_seed_users() -> Self {
        Self {
            users: Mutex::new(seed_users()),
        }
    }

    /// Mint an id for a synthesized account.
    #[must_use]
    pub fn next_id() -> UserId {
        UserId::new(format!("user_{}", Uuid::new_v4()))
    }

    /// Find an account by email, comparing case-insensitively.
    #[must_use]
    pub fn find_by_email(&self, email: &Email) -> Option<Identity> {
        let users = self.users.lock().expect("directory lock poisoned");
        users
            .iter()
            .find(|u| u.email.as_ref().is_some_and(|e| e.eq_ignore_case(email)))
            .cloned()
    }

    /// Find an account by phone number.
    #[must_use]
    pub fn find_by_phone(&self, phone: &Phone) -> Option<Identity> {
        let users = self.users.lock().expect("directory lock poisoned");
        users
            .iter()
            .find(|u| u.phone.as_ref() == Some(phone))
            .cloned()
    }

    /// Register a new account, enforcing contact-point uniqueness.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::EmailTaken`] or
    /// [`DirectoryError::PhoneTaken`] when the identity's email or phone is
    /// already bound to another account.
    pub fn register(&self, identity: Identity) -> Result<Identity, DirectoryError> {
        let mut users = self.users.lock().expect("directory lock poisoned");

        if let Some(email) = &identity.email
            && users
                .iter()
                .any(|u| u.email.as_ref().is_some_and(|e| e.eq_ignore_case(email)))
        {
            return Err(DirectoryError::EmailTaken);
        }

        if let Some(phone) = &identity.phone
            && users.iter().any(|u| u.phone.as_ref() == Some(phone))
        {
            return Err(DirectoryError::PhoneTaken);
        }

        users.push(identity.clone());
        Ok(identity)
    }

    /// Number of known accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.lock().expect("directory lock poisoned").len()
    }

    /// Whether the directory has no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fixed creation timestamp for seed accounts.
fn joined_at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

#[allow(clippy::unwrap_used)] // seed literals are checked by tests below
fn seed_users() -> Vec<Identity> {
    let account = |id: &str, name: &str, email: &str, phone: &str, role, avatar: &str, joined| {
        Identity::new(
            UserId::new(id),
            name,
            Email::parse(email).unwrap(),
            role,
        )
        .with_phone(Phone::parse(phone).unwrap())
        .with_avatar(format!("https://images.artvista.app/avatars/{avatar}"))
        .created(joined)
    };

    vec![
        account(
            "1",
            "Site Admin",
            "admin@artvista.app",
            "+15550100",
            Role::Admin,
            "admin.jpg",
            joined_at(2023, 2, 1),
        ),
        account(
            "2",
            "Mara Ellison",
            "mara@artvista.app",
            "+15550101",
            Role::Artist,
            "mara.jpg",
            joined_at(2023, 3, 15),
        ),
        account(
            "3",
            "Diego Fuentes",
            "diego@artvista.app",
            "+15550102",
            Role::Artist,
            "diego.jpg",
            joined_at(2023, 4, 10),
        ),
        account(
            "4",
            "Priya Shah",
            "priya@example.com",
            "+15550103",
            Role::Buyer,
            "priya.jpg",
            joined_at(2023, 5, 5),
        ),
        account(
            "5",
            "Tom Becker",
            "tom@example.com",
            "+15550104",
            Role::Buyer,
            "tom.jpg",
            joined_at(2023, 6, 20),
        ),
    ]
}
