use std::sync::Arc;
use std::time::Duration;

use super::errors::AuthenticationError;
use super::models::Credentials;
use super::models::StoredUser;
use super::ports::UserStore;
use crate::password::HashingPool;
use crate::password::PasswordError;

// Hashed once at construction; compared against when the username is unknown.
const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-users";

/// Checks submitted credentials against the user store.
///
/// Both failure paths (unknown username, wrong password) run one full hash
/// comparison and return the same error, so neither the message nor the
/// response time reveals whether a username exists.
pub struct CredentialVerifier<S>
where
    S: UserStore,
{
    store: Arc<S>,
    pool: HashingPool,
    dummy_hash: String,
    timeout: Duration,
}

impl<S> CredentialVerifier<S>
where
    S: UserStore,
{
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Create a verifier over a user store.
    ///
    /// Computes the dummy hash with the pool's current parameters, which blocks
    /// for one hashing round.
    ///
    /// # Errors
    /// * `HashingFailed` - Dummy hash could not be computed
    pub fn new(store: Arc<S>, pool: HashingPool) -> Result<Self, PasswordError> {
        let dummy_hash = pool.hasher().hash(DUMMY_PASSWORD)?;

        Ok(Self {
            store,
            pool,
            dummy_hash,
            timeout: Self::DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Look up the user and check the password.
    ///
    /// # Returns
    /// The full stored user record on success
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `TimedOut` - Lookup and comparison did not finish in time
    /// * `Store` - User store failed
    /// * `Hashing` - Hashing pool unavailable
    pub async fn verify_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<StoredUser, AuthenticationError> {
        match tokio::time::timeout(self.timeout, self.check(credentials)).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Credential check timed out"
                );
                Err(AuthenticationError::TimedOut)
            }
        }
    }

    async fn check(&self, credentials: &Credentials) -> Result<StoredUser, AuthenticationError> {
        let found = self
            .store
            .find_by_username(&credentials.username)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "User lookup failed");
                AuthenticationError::Store(e)
            })?;

        let hash = found
            .as_ref()
            .map_or(self.dummy_hash.as_str(), |user| user.password_hash.as_str());

        let matched = self.pool.verify(&credentials.password, hash).await?;

        match found {
            Some(user) if matched => Ok(user),
            _ => Err(AuthenticationError::InvalidCredentials),
        }
    }

    pub(crate) fn pool(&self) -> &HashingPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::config::HashingConfig;
    use crate::credentials::models::Gender;
    use crate::credentials::models::NewUser;
    use crate::credentials::models::Profile;
    use crate::credentials::models::UserId;
    use crate::credentials::ports::UserStoreError;

    mock! {
        pub TestUserStore {}

        #[async_trait]
        impl UserStore for TestUserStore {
            async fn find_by_username(&self, username: &str) -> Result<Option<StoredUser>, UserStoreError>;
            async fn create(&self, user: NewUser) -> Result<StoredUser, UserStoreError>;
        }
    }

    fn fast_pool() -> HashingPool {
        HashingPool::from_config(&HashingConfig {
            memory_kib: 256,
            iterations: 1,
            parallelism: 1,
            max_concurrent: 2,
        })
        .expect("valid config")
    }

    fn stored_user(pool: &HashingPool, username: &str, password: &str) -> StoredUser {
        StoredUser {
            id: UserId::new(),
            username: username.to_string(),
            password_hash: pool.hasher().hash(password).expect("Failed to hash password"),
            profile: Profile {
                first_name: "Alice".to_string(),
                last_name: "Liddell".to_string(),
                gender: Gender::Female,
                birthdate: NaiveDate::from_ymd_opt(1990, 5, 4).unwrap(),
                email: None,
            },
            created_at: Utc::now(),
        }
    }

    fn store_with_alice(pool: &HashingPool) -> MockTestUserStore {
        let alice = stored_user(pool, "alice", "secret123");
        let mut store = MockTestUserStore::new();
        store
            .expect_find_by_username()
            .returning(move |username| {
                Ok((username == "alice").then(|| alice.clone()))
            });
        store
    }

    #[tokio::test]
    async fn test_verify_credentials_success() {
        let pool = fast_pool();
        let verifier =
            CredentialVerifier::new(Arc::new(store_with_alice(&pool)), pool).unwrap();

        let user = verifier
            .verify_credentials(&Credentials::new("alice", "secret123"))
            .await
            .expect("credentials should verify");

        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_are_indistinguishable() {
        let pool = fast_pool();
        let verifier =
            CredentialVerifier::new(Arc::new(store_with_alice(&pool)), pool).unwrap();

        let wrong_password = verifier
            .verify_credentials(&Credentials::new("alice", "wrong"))
            .await
            .unwrap_err();
        let unknown_user = verifier
            .verify_credentials(&Credentials::new("bob", "wrong"))
            .await
            .unwrap_err();

        assert!(matches!(
            wrong_password,
            AuthenticationError::InvalidCredentials
        ));
        assert!(matches!(unknown_user, AuthenticationError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        assert_eq!(wrong_password.to_string(), "invalid username or password");
    }

    #[tokio::test]
    async fn test_unknown_user_does_not_match_dummy_password() {
        let pool = fast_pool();
        let verifier =
            CredentialVerifier::new(Arc::new(store_with_alice(&pool)), pool).unwrap();

        let result = verifier
            .verify_credentials(&Credentials::new("bob", DUMMY_PASSWORD))
            .await;

        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_dummy_hash_uses_current_parameters() {
        let pool = fast_pool();
        let verifier =
            CredentialVerifier::new(Arc::new(MockTestUserStore::new()), pool).unwrap();

        assert!(!verifier.pool().hasher().needs_rehash(&verifier.dummy_hash));
    }

    #[tokio::test]
    async fn test_lookup_is_exact_match() {
        let pool = fast_pool();
        let verifier =
            CredentialVerifier::new(Arc::new(store_with_alice(&pool)), pool).unwrap();

        let result = verifier
            .verify_credentials(&Credentials::new("Alice", "secret123"))
            .await;

        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_store_failure_is_reported() {
        let pool = fast_pool();
        let mut store = MockTestUserStore::new();
        store
            .expect_find_by_username()
            .times(1)
            .returning(|_| Err(UserStoreError::Unavailable("connection reset".to_string())));

        let verifier = CredentialVerifier::new(Arc::new(store), pool).unwrap();
        let result = verifier
            .verify_credentials(&Credentials::new("alice", "secret123"))
            .await;

        assert!(matches!(result, Err(AuthenticationError::Store(_))));
    }

    struct SlowUserStore;

    #[async_trait]
    impl UserStore for SlowUserStore {
        async fn find_by_username(
            &self,
            _username: &str,
        ) -> Result<Option<StoredUser>, UserStoreError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(None)
        }

        async fn create(&self, _user: NewUser) -> Result<StoredUser, UserStoreError> {
            Err(UserStoreError::Unavailable("read only".to_string()))
        }
    }

    #[tokio::test]
    async fn test_slow_store_times_out() {
        let verifier = CredentialVerifier::new(Arc::new(SlowUserStore), fast_pool())
            .unwrap()
            .with_timeout(Duration::from_millis(50));

        let result = verifier
            .verify_credentials(&Credentials::new("alice", "secret123"))
            .await;

        assert!(matches!(result, Err(AuthenticationError::TimedOut)));
    }
}
