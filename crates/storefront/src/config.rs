//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional and fall back to the documented defaults.
//!
//! - `ARTVISTA_NETWORK_DELAY_MS` - Simulated latency for credential and OTP
//!   operations (default: 1000). Set to 0 in tests.
//! - `ARTVISTA_OTP_CODE_LENGTH` - Digits per verification code
//!   (default: 6, allowed: 4-10)
//! - `ARTVISTA_OTP_TTL_SECS` - Seconds a verification code stays valid
//!   (default: 300)
//! - `ARTVISTA_DATA_DIR` - Directory for the file-backed store; unset means
//!   the embedder wires its own store

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_NETWORK_DELAY_MS: u64 = 1000;
const DEFAULT_OTP_CODE_LENGTH: usize = 6;
const DEFAULT_OTP_TTL_SECS: u64 = 300;

const MIN_OTP_CODE_LENGTH: usize = 4;
const MAX_OTP_CODE_LENGTH: usize = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Simulated latency applied to every suspending operation.
    pub network_delay: Duration,
    /// Digits per phone verification code.
    pub otp_code_length: usize,
    /// How long an issued verification code stays valid.
    pub otp_ttl: Duration,
    /// Data directory for the file-backed store, if durable persistence is
    /// wanted.
    pub data_dir: Option<PathBuf>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            network_delay: Duration::from_millis(DEFAULT_NETWORK_DELAY_MS),
            otp_code_length: DEFAULT_OTP_CODE_LENGTH,
            otp_ttl: Duration::from_secs(DEFAULT_OTP_TTL_SECS),
            data_dir: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but not parseable, or
    /// the OTP code length is outside the 4-10 range.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let network_delay_ms =
            parse_env_or("ARTVISTA_NETWORK_DELAY_MS", DEFAULT_NETWORK_DELAY_MS)?;
        let otp_code_length =
            parse_env_or("ARTVISTA_OTP_CODE_LENGTH", DEFAULT_OTP_CODE_LENGTH)?;
        let otp_ttl_secs = parse_env_or("ARTVISTA_OTP_TTL_SECS", DEFAULT_OTP_TTL_SECS)?;
        let data_dir = std::env::var("ARTVISTA_DATA_DIR").ok().map(PathBuf::from);

        if !(MIN_OTP_CODE_LENGTH..=MAX_OTP_CODE_LENGTH).contains(&otp_code_length) {
            return Err(ConfigError::InvalidEnvVar(
                "ARTVISTA_OTP_CODE_LENGTH".to_owned(),
                format!(
                    "must be between {MIN_OTP_CODE_LENGTH} and {MAX_OTP_CODE_LENGTH} (got {otp_code_length})"
                ),
            ));
        }

        Ok(Self {
            network_delay: Duration::from_millis(network_delay_ms),
            otp_code_length,
            otp_ttl: Duration::from_secs(otp_ttl_secs),
            data_dir,
        })
    }

    /// A configuration with zero simulated latency, for tests.
    #[must_use]
    pub fn without_delay() -> Self {
        Self {
            network_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_owned(), e.to_string())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.network_delay, Duration::from_millis(1000));
        assert_eq!(config.otp_code_length, 6);
        assert_eq!(config.otp_ttl, Duration::from_secs(300));
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_without_delay() {
        let config = StorefrontConfig::without_delay();
        assert_eq!(config.network_delay, Duration::ZERO);
        assert_eq!(config.otp_code_length, 6);
    }

    #[test]
    fn test_parse_env_or_uses_default_when_unset() {
        let value: u64 = parse_env_or("ARTVISTA_TEST_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }
}
