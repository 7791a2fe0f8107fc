//! Phone verification challenges.
//!
//! One live challenge per phone number. Issuing again replaces the old
//! challenge, a successful verification consumes it, and an expired code
//! verifies as stale. Completed verifications leave a one-shot marker the
//! login/signup completion step redeems.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use rand::Rng;
use tokio::time::Instant;

use artvista_core::Phone;

/// A verification code, as delivered to the phone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    fn generate(length: usize) -> Self {
        let mut rng = rand::rng();
        let code = (0..length)
            .map(|_| char::from(b'0' + rng.random_range(0..10)))
            .collect();
        Self(code)
    }

    /// The code digits.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OtpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct Challenge {
    code: OtpCode,
    issued_at: Instant,
}

/// Issues and verifies phone challenges.
pub(super) struct OtpIssuer {
    code_length: usize,
    ttl: Duration,
    challenges: HashMap<Phone, Challenge>,
    verified: HashSet<Phone>,
}

impl OtpIssuer {
    pub(super) fn new(code_length: usize, ttl: Duration) -> Self {
        Self {
            code_length,
            ttl,
            challenges: HashMap::new(),
            verified: HashSet::new(),
        }
    }

    /// Issue a fresh challenge for `phone`, invalidating any previous one.
    pub(super) fn issue(&mut self, phone: &Phone) -> OtpCode {
        let code = OtpCode::generate(self.code_length);
        self.challenges.insert(
            phone.clone(),
            Challenge {
                code: code.clone(),
                issued_at: Instant::now(),
            },
        );
        code
    }

    /// Check `code` against the live challenge for `phone`.
    ///
    /// On success the challenge is consumed and the phone marked verified.
    /// A wrong code leaves the challenge live for another attempt; an
    /// expired challenge is dropped.
    pub(super) fn verify(&mut self, phone: &Phone, code: &str) -> bool {
        let Some(challenge) = self.challenges.get(phone) else {
            return false;
        };

        if challenge.issued_at.elapsed() > self.ttl {
            self.challenges.remove(phone);
            return false;
        }

        if challenge.code.as_str() != code {
            return false;
        }

        self.challenges.remove(phone);
        self.verified.insert(phone.clone());
        true
    }

    /// Redeem the one-shot verified marker for `phone`.
    pub(super) fn redeem_verified(&mut self, phone: &Phone) -> bool {
        self.verified.remove(phone)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn phone() -> Phone {
        Phone::parse("+15550199").unwrap()
    }

    fn issuer() -> OtpIssuer {
        OtpIssuer::new(6, Duration::from_secs(300))
    }

    #[tokio::test]
    async fn test_issue_generates_distinct_codes() {
        let mut issuer = issuer();
        let first = issuer.issue(&phone());
        assert_eq!(first.as_str().len(), 6);
        assert!(first.as_str().chars().all(|c| c.is_ascii_digit()));

        // Re-issuing replaces the old code; the old one no longer verifies.
        let second = issuer.issue(&phone());
        assert!(!issuer.verify(&phone(), first.as_str()) || first == second);
        if first != second {
            assert!(issuer.verify(&phone(), second.as_str()));
        }
    }

    #[tokio::test]
    async fn test_verify_consumes_challenge() {
        let mut issuer = issuer();
        let code = issuer.issue(&phone());

        assert!(issuer.verify(&phone(), code.as_str()));
        // Already consumed.
        assert!(!issuer.verify(&phone(), code.as_str()));
    }

    #[tokio::test]
    async fn test_wrong_code_leaves_challenge_live() {
        let mut issuer = issuer();
        let code = issuer.issue(&phone());

        assert!(!issuer.verify(&phone(), "000000x"));
        assert!(issuer.verify(&phone(), code.as_str()));
    }

    #[tokio::test]
    async fn test_verify_without_challenge_fails() {
        let mut issuer = issuer();
        assert!(!issuer.verify(&phone(), "123456"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_challenge_fails() {
        let mut issuer = OtpIssuer::new(6, Duration::from_secs(300));
        let code = issuer.issue(&phone());

        tokio::time::advance(Duration::from_secs(301)).await;

        assert!(!issuer.verify(&phone(), code.as_str()));
        // The expired challenge is gone entirely; even a re-submit of the
        // right code fails until a new one is issued.
        assert!(!issuer.verify(&phone(), code.as_str()));
    }

    #[tokio::test]
    async fn test_redeem_verified_is_one_shot() {
        let mut issuer = issuer();
        let code = issuer.issue(&phone());
        assert!(issuer.verify(&phone(), code.as_str()));

        assert!(issuer.redeem_verified(&phone()));
        assert!(!issuer.redeem_verified(&phone()));
    }
}
