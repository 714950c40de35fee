use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;

use crate::config::AuthConfig;
use crate::config::AuthConfigError;
use crate::credentials::AuthenticationError;
use crate::credentials::CredentialVerifier;
use crate::credentials::Credentials;
use crate::credentials::NewUser;
use crate::credentials::Profile;
use crate::credentials::StoredUser;
use crate::credentials::UserStore;
use crate::credentials::UserStoreError;
use crate::identity;
use crate::identity::IdentityClaim;
use crate::password::HashingPool;
use crate::password::PasswordError;
use crate::token::TokenError;
use crate::token::TokenService;

/// Authentication coordinator combining credential checks, password hashing
/// and token handling.
pub struct Authenticator<S>
where
    S: UserStore,
{
    store: Arc<S>,
    verifier: CredentialVerifier<S>,
    tokens: TokenService,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Store(#[from] UserStoreError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] AuthConfigError),
}

impl<S> Authenticator<S>
where
    S: UserStore,
{
    /// Create a new authenticator.
    ///
    /// Blocks for one hashing round while the credential verifier prepares
    /// its dummy hash.
    ///
    /// # Errors
    /// * `Config` - Secret, lifetime or hashing parameters rejected
    /// * `Password` - Dummy hash could not be computed
    pub fn new(config: &AuthConfig, store: Arc<S>) -> Result<Self, AuthError> {
        let tokens = TokenService::new(&config.token)?;
        let pool = HashingPool::from_config(&config.hashing)?;
        let verifier = CredentialVerifier::new(Arc::clone(&store), pool)?
            .with_timeout(config.login_timeout());

        Ok(Self {
            store,
            verifier,
            tokens,
        })
    }

    /// Verify credentials and issue a token for the user.
    ///
    /// # Errors
    /// * `Authentication` - Unknown user, wrong password, timeout or store failure
    /// * `Token` - Token generation failed
    pub async fn login(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthenticationResult, AuthError> {
        let user = self.verifier.verify_credentials(credentials).await?;

        if self.verifier.pool().hasher().needs_rehash(&user.password_hash) {
            tracing::info!(
                user_id = %user.id,
                "Stored password hash uses outdated parameters"
            );
        }

        let claim = identity::project(&user);
        let now = Utc::now();
        let access_token = self.tokens.generate_token_at(&claim, now)?;

        tracing::debug!(user_id = %user.id, "Issued access token");

        Ok(AuthenticationResult {
            access_token,
            expires_at: now + self.tokens.lifetime(),
        })
    }

    /// Validate a bearer token and return the identity it carries.
    ///
    /// # Errors
    /// * `Missing` / `Invalid` - Token absent, forged or malformed
    /// * `Expired` - Token past its expiry
    pub fn who_am_i(&self, token: &str) -> Result<IdentityClaim, TokenError> {
        self.tokens.verify_token(token)
    }

    /// Hash the password and register a new user with the store.
    ///
    /// # Errors
    /// * `Password` - Hashing failed
    /// * `Store` - Username taken or store failure
    pub async fn sign_up(
        &self,
        credentials: Credentials,
        profile: Profile,
    ) -> Result<StoredUser, AuthError> {
        let password_hash = self.verifier.pool().hash(&credentials.password).await?;

        let user = self
            .store
            .create(NewUser {
                username: credentials.username,
                password_hash,
                profile,
            })
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(user)
    }

    /// Token service used for issuing and verifying tokens.
    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }
}
