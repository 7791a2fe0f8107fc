//! Session error types.

use thiserror::Error;

use artvista_core::{EmailError, PhoneError};

/// Errors that can occur during session operations.
///
/// Every failure is terminal for the attempt and recoverable by retrying
/// with corrected input; none of them disturb the prior session state.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Login lookup failed to match any account.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Signup email is already bound to an account.
    #[error("email already in use")]
    EmailAlreadyInUse,

    /// Signup phone is already bound to an account.
    #[error("phone number already registered")]
    PhoneAlreadyRegistered,

    /// Submitted code does not match a live challenge, the challenge
    /// expired, or no challenge exists.
    #[error("invalid verification code")]
    InvalidOtp,

    /// Signup's two password entries differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Malformed email input.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Malformed phone input.
    #[error("invalid phone number: {0}")]
    InvalidPhone(#[from] PhoneError),
}
