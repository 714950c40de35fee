use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Error for invalid authentication configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthConfigError {
    #[error("Signing secret too short: minimum {min} bytes, got {actual}")]
    SecretTooShort { min: usize, actual: usize },

    #[error("Token lifetime must be between 1 second and {max} seconds, got {actual}")]
    InvalidLifetime { max: u64, actual: u64 },

    #[error("Invalid password hashing parameters: {0}")]
    InvalidHashingParams(String),

    #[error("Password hashing needs at least one concurrent worker")]
    NoHashingWorkers,
}

/// Authentication settings, loaded once at startup and never mutated.
#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub token: TokenConfig,

    #[serde(default)]
    pub hashing: HashingConfig,

    /// Upper bound for a complete credential check (store lookup + hash comparison)
    #[serde(default = "default_login_timeout_ms")]
    pub login_timeout_ms: u64,
}

impl AuthConfig {
    pub fn new(token: TokenConfig) -> Self {
        Self {
            token,
            hashing: HashingConfig::default(),
            login_timeout_ms: default_login_timeout_ms(),
        }
    }

    pub fn login_timeout(&self) -> Duration {
        Duration::from_millis(self.login_timeout_ms)
    }
}

/// Token signing settings.
#[derive(Deserialize, Clone)]
pub struct TokenConfig {
    /// HMAC secret shared by signing and verification
    pub secret: String,

    #[serde(default = "default_lifetime_seconds")]
    pub lifetime_seconds: u64,
}

impl TokenConfig {
    pub const MIN_SECRET_LENGTH: usize = 32;

    // Keeps `iat + lifetime` far away from i64 overflow.
    pub const MAX_LIFETIME_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

    pub fn new(secret: impl Into<String>, lifetime_seconds: u64) -> Self {
        Self {
            secret: secret.into(),
            lifetime_seconds,
        }
    }

    /// Check the secret length and lifetime bounds.
    ///
    /// # Errors
    /// * `SecretTooShort` - Secret has fewer than 32 bytes
    /// * `InvalidLifetime` - Lifetime is zero or unreasonably large
    pub fn validate(&self) -> Result<(), AuthConfigError> {
        let actual = self.secret.len();
        if actual < Self::MIN_SECRET_LENGTH {
            return Err(AuthConfigError::SecretTooShort {
                min: Self::MIN_SECRET_LENGTH,
                actual,
            });
        }

        if self.lifetime_seconds == 0 || self.lifetime_seconds > Self::MAX_LIFETIME_SECONDS {
            return Err(AuthConfigError::InvalidLifetime {
                max: Self::MAX_LIFETIME_SECONDS,
                actual: self.lifetime_seconds,
            });
        }

        Ok(())
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("lifetime_seconds", &self.lifetime_seconds)
            .finish()
    }
}

/// Argon2id cost parameters and the hashing concurrency limit.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct HashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
    pub max_concurrent: usize,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: argon2::Params::DEFAULT_M_COST,
            iterations: argon2::Params::DEFAULT_T_COST,
            parallelism: argon2::Params::DEFAULT_P_COST,
            max_concurrent: 4,
        }
    }
}

fn default_login_timeout_ms() -> u64 {
    5_000
}

fn default_lifetime_seconds() -> u64 {
    12 * 60 * 60
}
