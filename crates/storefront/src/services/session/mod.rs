//! Session service.
//!
//! Resolves credential attempts into the current identity and keeps that
//! identity persisted across reloads. Three flows are supported: email and
//! password against the account directory, phone number with a one-time
//! code, and an already-verified OAuth assertion.
//!
//! Every credential operation suspends for the configured simulated
//! network delay, so swapping in a real backend changes no caller
//! contract. Failures never disturb the prior state: a failed login leaves
//! the existing session alone, a failed code leaves the challenge live.

mod error;
mod otp;

pub use error::SessionError;
pub use otp::OtpCode;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, info};

use artvista_core::{Email, OAuthAssertion, Phone, Role};

use crate::config::StorefrontConfig;
use crate::directory::{DirectoryError, UserDirectory};
use crate::models::Identity;
use crate::notify::{Notice, NotificationSink};
use crate::storage::{self, KeyValueStore, keys};

use otp::OtpIssuer;

/// Session service.
///
/// Owns the current identity and the outstanding phone challenges. Obtain
/// one per browsing context and share it behind the application state.
pub struct SessionManager {
    directory: Arc<UserDirectory>,
    store: Arc<dyn KeyValueStore>,
    sink: Arc<dyn NotificationSink>,
    otp: Mutex<OtpIssuer>,
    current: Mutex<Option<Identity>>,
    delay: Duration,
}

impl SessionManager {
    /// Create a new session service.
    #[must_use]
    pub fn new(
        directory: Arc<UserDirectory>,
        store: Arc<dyn KeyValueStore>,
        sink: Arc<dyn NotificationSink>,
        config: &StorefrontConfig,
    ) -> Self {
        Self {
            directory,
            store,
            sink,
            otp: Mutex::new(OtpIssuer::new(config.otp_code_length, config.otp_ttl)),
            current: Mutex::new(None),
            delay: config.network_delay,
        }
    }

    // =========================================================================
    // Session lifecycle
    // =========================================================================

    /// Restore the persisted identity, if any.
    ///
    /// Called once at startup. A malformed or contact-less record is purged
    /// and the session comes up anonymous; no error reaches the caller.
    pub fn restore_session(&self) -> Option<Identity> {
        let restored: Option<Identity> = storage::load_or_reset(self.store.as_ref(), keys::SESSION);

        let restored = match restored {
            Some(identity) if identity.has_contact() => Some(identity),
            Some(_) => {
                tracing::warn!("stored identity has no contact point, purging");
                storage::purge(self.store.as_ref(), keys::SESSION);
                None
            }
            None => None,
        };

        *self.current.lock().expect("session lock poisoned") = restored.clone();
        if let Some(identity) = &restored {
            info!(user = %identity.id, "session restored");
        }
        restored
    }

    /// The current identity, if authenticated.
    #[must_use]
    pub fn current(&self) -> Option<Identity> {
        self.current.lock().expect("session lock poisoned").clone()
    }

    /// Whether an identity is current.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current
            .lock()
            .expect("session lock poisoned")
            .is_some()
    }

    /// Clear the current identity and its persisted record.
    ///
    /// Idempotent: logging out while anonymous is a no-op.
    pub fn logout(&self) {
        let previous = self
            .current
            .lock()
            .expect("session lock poisoned")
            .take();

        if let Some(identity) = previous {
            storage::purge(self.store.as_ref(), keys::SESSION);
            info!(user = %identity.id, "logged out");
            self.sink.notify(Notice::LoggedOut);
        }
    }

    // =========================================================================
    // Email and password
    // =========================================================================

    /// Login with email and password.
    ///
    /// The password is accepted but not verified against a stored secret:
    /// the directory keeps none. Kept in the signature so a real verifier
    /// can slot in without changing callers.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidEmail` if the email is malformed.
    /// Returns `SessionError::InvalidCredentials` if no account matches.
    pub async fn login_with_password(
        &self,
        email: &str,
        _password: &str,
    ) -> Result<Identity, SessionError> {
        self.suspend().await;

        let email = Email::parse(email)?;

        let Some(identity) = self.directory.find_by_email(&email) else {
            self.sink.notify(Notice::LoginFailed);
            return Err(SessionError::InvalidCredentials);
        };

        Ok(self.establish(identity, Flow::Login))
    }

    /// Register a new account with email and password.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::PasswordMismatch` if the two password entries
    /// differ (checked before any other effect).
    /// Returns `SessionError::InvalidEmail` if the email is malformed.
    /// Returns `SessionError::EmailAlreadyInUse` if the email matches an
    /// existing account case-insensitively.
    pub async fn signup_with_password(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
        role: Role,
    ) -> Result<Identity, SessionError> {
        if password != confirm_password {
            self.sink.notify(Notice::SignupFailed);
            return Err(SessionError::PasswordMismatch);
        }

        self.suspend().await;

        let email = Email::parse(email)?;
        let identity = Identity::new(UserDirectory::next_id(), name, email, role);
        let identity = self.register(identity)?;

        Ok(self.establish(identity, Flow::Signup))
    }

    // =========================================================================
    // Phone and one-time code
    // =========================================================================

    /// Issue a verification code for `phone`, replacing any previous one.
    ///
    /// The returned code is the hand-off to the SMS delivery collaborator;
    /// this service neither formats nor sends the message.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhone` if the phone is malformed.
    pub async fn request_phone_challenge(&self, phone: &str) -> Result<OtpCode, SessionError> {
        let phone = Phone::parse(phone)?;

        self.suspend().await;

        let code = self
            .otp
            .lock()
            .expect("otp lock poisoned")
            .issue(&phone);
        debug!(%phone, "verification code issued");
        self.sink.notify(Notice::OtpSent { phone });

        Ok(code)
    }

    /// Check a submitted code against the live challenge for `phone`.
    ///
    /// On success the challenge is consumed and the phone may complete a
    /// login or signup. A wrong code leaves the challenge live for another
    /// attempt.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhone` if the phone is malformed.
    /// Returns `SessionError::InvalidOtp` if the code is wrong, the
    /// challenge expired, or none exists.
    pub async fn verify_phone_challenge(&self, phone: &str, code: &str) -> Result<(), SessionError> {
        let phone = Phone::parse(phone)?;

        self.suspend().await;

        let verified = self
            .otp
            .lock()
            .expect("otp lock poisoned")
            .verify(&phone, code);

        if verified {
            Ok(())
        } else {
            self.sink.notify(Notice::OtpRejected);
            Err(SessionError::InvalidOtp)
        }
    }

    /// Complete a phone login after a successful verification.
    ///
    /// An account bound to the phone logs in; an unknown phone gets a fresh
    /// account synthesized around a placeholder email.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhone` if the phone is malformed.
    /// Returns `SessionError::InvalidOtp` if the phone was not verified
    /// first (or the verification was already redeemed).
    pub async fn complete_phone_login(&self, phone: &str) -> Result<Identity, SessionError> {
        let phone = Phone::parse(phone)?;

        self.suspend().await;
        self.redeem_verified(&phone)?;

        if let Some(identity) = self.directory.find_by_phone(&phone) {
            return Ok(self.establish(identity, Flow::Login));
        }

        let name = placeholder_name(&phone);
        let identity = self.synthesize_phone_identity(&name, phone, Role::default())?;
        Ok(self.establish(identity, Flow::Login))
    }

    /// Complete a phone signup after a successful verification.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidPhone` if the phone is malformed.
    /// Returns `SessionError::InvalidOtp` if the phone was not verified
    /// first.
    /// Returns `SessionError::PhoneAlreadyRegistered` if the phone is
    /// bound to an existing account.
    pub async fn complete_phone_signup(
        &self,
        name: &str,
        phone: &str,
        role: Role,
    ) -> Result<Identity, SessionError> {
        let phone = Phone::parse(phone)?;

        self.suspend().await;
        self.redeem_verified(&phone)?;

        if self.directory.find_by_phone(&phone).is_some() {
            self.sink.notify(Notice::SignupFailed);
            return Err(SessionError::PhoneAlreadyRegistered);
        }

        let identity = self.synthesize_phone_identity(name, phone, role)?;
        Ok(self.establish(identity, Flow::Signup))
    }

    // =========================================================================
    // OAuth
    // =========================================================================

    /// Login with a verified external assertion, creating the account on
    /// first sight.
    ///
    /// Matching is by the assertion's email, case-insensitively. `role`
    /// applies only when a new account is created; an existing account
    /// keeps the role it was created with.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmailAlreadyInUse` only in the unlikely race
    /// where the account appears between lookup and registration.
    pub async fn login_with_oauth(
        &self,
        assertion: OAuthAssertion,
        role: Role,
    ) -> Result<Identity, SessionError> {
        self.suspend().await;

        if let Some(identity) = self.directory.find_by_email(&assertion.email) {
            return Ok(self.establish(identity, Flow::Login));
        }

        let mut identity = Identity::new(
            UserDirectory::next_id(),
            assertion.name,
            assertion.email,
            role,
        );
        if let Some(avatar) = assertion.avatar_url {
            identity = identity.with_avatar(avatar);
        }
        let identity = self.register(identity)?;

        Ok(self.establish(identity, Flow::Signup))
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Simulated network latency; the suspension point every credential
    /// operation shares.
    async fn suspend(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    fn redeem_verified(&self, phone: &Phone) -> Result<(), SessionError> {
        let redeemed = self
            .otp
            .lock()
            .expect("otp lock poisoned")
            .redeem_verified(phone);
        if redeemed {
            Ok(())
        } else {
            self.sink.notify(Notice::OtpRejected);
            Err(SessionError::InvalidOtp)
        }
    }

    fn synthesize_phone_identity(
        &self,
        name: &str,
        phone: Phone,
        role: Role,
    ) -> Result<Identity, SessionError> {
        let email = placeholder_email(&phone)?;
        let identity =
            Identity::new(UserDirectory::next_id(), name, email, role).with_phone(phone);
        self.register(identity)
    }

    fn register(&self, identity: Identity) -> Result<Identity, SessionError> {
        self.directory.register(identity).map_err(|err| {
            self.sink.notify(Notice::SignupFailed);
            match err {
                DirectoryError::EmailTaken => SessionError::EmailAlreadyInUse,
                DirectoryError::PhoneTaken => SessionError::PhoneAlreadyRegistered,
            }
        })
    }

    /// Make `identity` current, persist it, and report the outcome.
    fn establish(&self, identity: Identity, flow: Flow) -> Identity {
        storage::persist(self.store.as_ref(), keys::SESSION, &identity);
        *self.current.lock().expect("session lock poisoned") = Some(identity.clone());

        info!(user = %identity.id, role = %identity.role, "session established");
        let notice = match flow {
            Flow::Login => Notice::LoginSucceeded {
                name: identity.name.clone(),
            },
            Flow::Signup => Notice::SignupSucceeded {
                name: identity.name.clone(),
            },
        };
        self.sink.notify(notice);

        identity
    }
}

#[derive(Clone, Copy)]
enum Flow {
    Login,
    Signup,
}

/// Placeholder email for accounts synthesized from a bare phone number.
fn placeholder_email(phone: &Phone) -> Result<Email, SessionError> {
    Ok(Email::parse(&format!(
        "{}@phone.artvista.app",
        phone.digits()
    ))?)
}

/// Placeholder display name for accounts synthesized from a bare phone
/// number.
fn placeholder_name(phone: &Phone) -> String {
    let digits = phone.digits();
    let tail = digits
        .get(digits.len().saturating_sub(4)..)
        .unwrap_or(digits);
    format!("Member {tail}")
}
