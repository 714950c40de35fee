//! Credential verification and bearer-token library
//!
//! Provides the security-critical core of user authentication:
//! - Password hashing (Argon2id) with bounded, off-runtime execution
//! - Credential verification against a pluggable user store
//! - Projection of a user record to a minimal identity claim
//! - JWT token generation and validation with explicit expiry handling
//!
//! Storage and transport are left to the caller: the user store is a trait,
//! and every operation takes and returns plain data.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{IdentityClaim, TokenConfig, TokenService};
//!
//! let tokens = TokenService::new(&TokenConfig::new("secret_key_at_least_32_bytes_long!", 3600)).unwrap();
//! let claim = IdentityClaim::new("alice", "alice");
//! let token = tokens.generate_token(&claim).unwrap();
//! assert_eq!(tokens.verify_token(&token).unwrap(), claim);
//! ```

pub mod authenticator;
pub mod config;
pub mod credentials;
pub mod identity;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use config::AuthConfig;
pub use config::AuthConfigError;
pub use config::HashingConfig;
pub use config::TokenConfig;
pub use credentials::AuthenticationError;
pub use credentials::CredentialVerifier;
pub use credentials::Credentials;
pub use credentials::Gender;
pub use credentials::NewUser;
pub use credentials::Profile;
pub use credentials::StoredUser;
pub use credentials::UserId;
pub use credentials::UserStore;
pub use credentials::UserStoreError;
pub use identity::IdentityClaim;
pub use password::HashingPool;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::TokenError;
pub use token::TokenService;
