use std::sync::Arc;

use tokio::sync::OwnedSemaphorePermit;
use tokio::sync::Semaphore;

use super::argon2::PasswordHasher;
use super::errors::PasswordError;
use crate::config::AuthConfigError;
use crate::config::HashingConfig;

/// Runs password hashing on the blocking thread pool with bounded concurrency.
///
/// Each operation waits for a permit, then moves to `spawn_blocking`; at most
/// `max_concurrent` Argon2 computations are in flight at once.
#[derive(Clone)]
pub struct HashingPool {
    hasher: Arc<PasswordHasher>,
    permits: Arc<Semaphore>,
}

impl HashingPool {
    /// Create a pool around an existing hasher.
    ///
    /// # Errors
    /// * `NoHashingWorkers` - `max_concurrent` is zero
    pub fn new(hasher: PasswordHasher, max_concurrent: usize) -> Result<Self, AuthConfigError> {
        if max_concurrent == 0 {
            return Err(AuthConfigError::NoHashingWorkers);
        }

        Ok(Self {
            hasher: Arc::new(hasher),
            permits: Arc::new(Semaphore::new(max_concurrent)),
        })
    }

    /// Build hasher and pool from configuration.
    pub fn from_config(config: &HashingConfig) -> Result<Self, AuthConfigError> {
        Self::new(PasswordHasher::with_config(config)?, config.max_concurrent)
    }

    /// Direct access to the hasher for synchronous, off-runtime callers.
    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    /// Hash a password on the blocking pool.
    ///
    /// # Errors
    /// * `HashingFailed` - Argon2 or the RNG failed
    /// * `WorkerUnavailable` - Pool closed or the blocking task died
    pub async fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let permit = self.acquire().await?;

        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            hasher.hash(&password)
        })
        .await
        .map_err(|e| PasswordError::WorkerUnavailable(e.to_string()))?
    }

    /// Verify a password on the blocking pool.
    ///
    /// # Returns
    /// Same result as `PasswordHasher::verify`
    ///
    /// # Errors
    /// * `WorkerUnavailable` - Pool closed or the blocking task died
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let permit = self.acquire().await?;

        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            hasher.verify(&password, &hash)
        })
        .await
        .map_err(|e| PasswordError::WorkerUnavailable(e.to_string()))
    }

    // The permit travels into the blocking task, so it is held until Argon2
    // returns even if the awaiting caller is dropped.
    async fn acquire(&self) -> Result<OwnedSemaphorePermit, PasswordError> {
        Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|e| PasswordError::WorkerUnavailable(e.to_string()))
    }

    /// Number of hashing operations that could start right now.
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config(max_concurrent: usize) -> HashingConfig {
        HashingConfig {
            memory_kib: 256,
            iterations: 1,
            parallelism: 1,
            max_concurrent,
        }
    }

    #[tokio::test]
    async fn test_hash_and_verify() {
        let pool = HashingPool::from_config(&fast_config(2)).expect("valid config");

        let hash = pool.hash("secret123").await.expect("Failed to hash password");

        assert!(pool.verify("secret123", &hash).await.expect("pool available"));
        assert!(!pool.verify("secret124", &hash).await.expect("pool available"));
        assert_eq!(pool.available_permits(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_hashing_respects_limit() {
        let pool = HashingPool::from_config(&fast_config(1)).expect("valid config");

        let tasks: Vec<_> = (0..4)
            .map(|i| {
                let pool = pool.clone();
                tokio::spawn(async move { pool.hash(&format!("password-{i}")).await })
            })
            .collect();

        for task in tasks {
            let hash = task.await.expect("task panicked").expect("hash failed");
            assert!(hash.starts_with("$argon2id$"));
        }
        assert_eq!(pool.available_permits(), 1);
    }

    #[tokio::test]
    async fn test_abandoned_verify_keeps_permit_until_done() {
        let config = HashingConfig {
            memory_kib: 65_536,
            iterations: 4,
            parallelism: 1,
            max_concurrent: 1,
        };
        let pool = HashingPool::from_config(&config).expect("valid config");
        let hash = pool.hasher().hash("secret123").expect("Failed to hash password");

        let abandoned = tokio::time::timeout(
            std::time::Duration::from_millis(1),
            pool.verify("secret123", &hash),
        )
        .await;

        assert!(abandoned.is_err());
        assert_eq!(pool.available_permits(), 0);

        let released = tokio::time::timeout(std::time::Duration::from_secs(30), async {
            while pool.available_permits() == 0 {
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            }
        })
        .await;
        assert!(released.is_ok());
        assert_eq!(pool.available_permits(), 1);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let result = HashingPool::from_config(&fast_config(0));
        assert!(matches!(result, Err(AuthConfigError::NoHashingWorkers)));
    }
}
