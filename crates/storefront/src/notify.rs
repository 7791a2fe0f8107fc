//! Outcome events toward the presentation layer.
//!
//! The services report what happened; how that becomes a toast is the
//! embedding application's business. The core only classifies the outcome
//! kind and carries the few values a message would interpolate.

use artvista_core::Phone;

/// Whether an outcome should read as good or bad news.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A user-facing outcome event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A login flow resolved to an identity.
    LoginSucceeded { name: String },
    /// A login flow failed.
    LoginFailed,
    /// A signup flow created and logged in an identity.
    SignupSucceeded { name: String },
    /// A signup flow failed.
    SignupFailed,
    /// A verification code was issued for a phone number.
    OtpSent { phone: Phone },
    /// A submitted verification code was rejected.
    OtpRejected,
    /// The current identity was cleared.
    LoggedOut,
    /// A new line was added to the cart.
    CartItemAdded { title: String },
    /// An existing line's quantity changed.
    CartQuantityUpdated { title: String },
    /// A line was removed from the cart.
    CartItemRemoved { title: String },
    /// Every line was removed from the cart.
    CartCleared,
}

impl Notice {
    /// Classify the outcome.
    #[must_use]
    pub const fn kind(&self) -> NoticeKind {
        match self {
            Self::LoginFailed | Self::SignupFailed | Self::OtpRejected => NoticeKind::Error,
            _ => NoticeKind::Success,
        }
    }
}

/// Receiver for outcome events.
///
/// Implemented by the presentation layer; the default [`TracingSink`] just
/// logs.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Sink that reports outcomes through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, notice: Notice) {
        match notice.kind() {
            NoticeKind::Success => tracing::info!(?notice, "outcome"),
            NoticeKind::Error => tracing::warn!(?notice, "outcome"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            Notice::LoginSucceeded {
                name: "Priya Shah".to_owned()
            }
            .kind(),
            NoticeKind::Success
        );
        assert_eq!(Notice::LoginFailed.kind(), NoticeKind::Error);
        assert_eq!(Notice::OtpRejected.kind(), NoticeKind::Error);
        assert_eq!(Notice::CartCleared.kind(), NoticeKind::Success);
    }
}
