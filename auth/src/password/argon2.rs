use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;
use crate::config::AuthConfigError;
use crate::config::HashingConfig;

/// Password hashing implementation.
///
/// Produces self-describing PHC strings (`$argon2id$v=19$m=..,t=..,p=..$salt$digest`),
/// so a record keeps verifying after the configured cost changes.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a new password hasher with the library's default Argon2id cost.
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Create a password hasher with explicit Argon2id cost parameters.
    ///
    /// # Errors
    /// * `InvalidHashingParams` - Parameters rejected by Argon2 (e.g. memory below 8 KiB per lane)
    pub fn with_config(config: &HashingConfig) -> Result<Self, AuthConfigError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| AuthConfigError::InvalidHashingParams(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext password securely.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// The digest is recomputed with the algorithm, version, cost and salt
    /// recorded in `hash` and compared in constant time.
    ///
    /// # Returns
    /// True if password matches; false on mismatch, malformed hash or unsupported algorithm
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Whether a stored hash was produced with different parameters than this hasher uses.
    ///
    /// Records that cannot be parsed are reported as needing a rehash.
    pub fn needs_rehash(&self, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return true;
        };

        if parsed_hash.algorithm != Algorithm::Argon2id.ident() {
            return true;
        }

        let Ok(stored) = Params::try_from(&parsed_hash) else {
            return true;
        };

        let current = self.argon2.params();
        stored.m_cost() != current.m_cost()
            || stored.t_cost() != current.t_cost()
            || stored.p_cost() != current.p_cost()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::with_config(&HashingConfig {
            memory_kib: 256,
            iterations: 1,
            parallelism: 1,
            max_concurrent: 1,
        })
        .expect("valid params")
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = fast_hasher();

        let first = hasher.hash("secret123").expect("Failed to hash password");
        let second = hasher.hash("secret123").expect("Failed to hash password");

        assert_ne!(first, second);
        assert!(hasher.verify("secret123", &first));
        assert!(hasher.verify("secret123", &second));
    }

    #[test]
    fn test_hash_never_contains_plaintext() {
        let hasher = fast_hasher();
        let hash = hasher.hash("secret123").expect("Failed to hash password");

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("secret123"));
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = fast_hasher();
        assert!(!hasher.verify("password", "invalid_hash"));
        assert!(!hasher.verify("password", ""));
    }

    #[test]
    fn test_verify_unsupported_algorithm() {
        let hasher = fast_hasher();
        let bcrypt = "$2a$10$N9qo8uLOickgx2ZMRZoMyeIjZAgcfl7p92ldGxad68LJZdL17lhWy";
        assert!(!hasher.verify("password", bcrypt));
    }

    #[test]
    fn test_verify_uses_cost_embedded_in_hash() {
        let cheap = fast_hasher();
        let stronger = PasswordHasher::with_config(&HashingConfig {
            memory_kib: 512,
            iterations: 2,
            parallelism: 1,
            max_concurrent: 1,
        })
        .expect("valid params");

        let old_hash = cheap.hash("secret123").expect("Failed to hash password");

        assert!(stronger.verify("secret123", &old_hash));
        assert!(stronger.needs_rehash(&old_hash));
        assert!(!cheap.needs_rehash(&old_hash));
    }

    #[test]
    fn test_needs_rehash_malformed() {
        assert!(fast_hasher().needs_rehash("not-a-phc-string"));
    }

    #[test]
    fn test_with_config_rejects_invalid_params() {
        let result = PasswordHasher::with_config(&HashingConfig {
            memory_kib: 1,
            iterations: 1,
            parallelism: 1,
            max_concurrent: 1,
        });
        assert!(matches!(
            result,
            Err(AuthConfigError::InvalidHashingParams(_))
        ));
    }
}
