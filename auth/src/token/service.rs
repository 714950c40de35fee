use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::TokenClaims;
use super::errors::TokenError;
use crate::config::AuthConfigError;
use crate::config::TokenConfig;
use crate::identity::IdentityClaim;

/// Issues and verifies HS256 bearer tokens.
///
/// Signing and verification share one process-held secret. Expiry is checked
/// here against the caller's clock rather than inside `jsonwebtoken`, so an
/// expired token is only reported as such once its signature is known good.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl TokenService {
    const ALGORITHM: Algorithm = Algorithm::HS256;

    /// Create a token service from validated configuration.
    ///
    /// # Errors
    /// * `SecretTooShort` - Secret has fewer than 32 bytes
    /// * `InvalidLifetime` - Lifetime is zero or out of range
    pub fn new(config: &TokenConfig) -> Result<Self, AuthConfigError> {
        config.validate()?;

        let secret = config.secret.as_bytes();

        let mut validation = Validation::new(Self::ALGORITHM);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            lifetime: Duration::seconds(config.lifetime_seconds as i64),
        })
    }

    /// Configured token lifetime.
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Sign `claim` into a token issued now.
    ///
    /// # Errors
    /// * `InvalidClaim` - Claim has no subject
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn generate_token(&self, claim: &IdentityClaim) -> Result<String, TokenError> {
        self.generate_token_at(claim, Utc::now())
    }

    /// Sign `claim` into a token issued at `now`.
    pub fn generate_token_at(
        &self,
        claim: &IdentityClaim,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        if claim.is_empty() {
            return Err(TokenError::InvalidClaim);
        }

        let claims = TokenClaims::issue(claim, now, self.lifetime);

        encode(&Header::new(Self::ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and recover its identity claim.
    ///
    /// # Errors
    /// * `Missing` - Token is empty
    /// * `Invalid` - Bad signature, wrong algorithm or unreadable payload
    /// * `Expired` - Signature is valid but the expiry has passed
    pub fn verify_token(&self, token: &str) -> Result<IdentityClaim, TokenError> {
        self.verify_token_at(token, Utc::now())
    }

    /// Verify a token against the clock reading `now`.
    pub fn verify_token_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<IdentityClaim, TokenError> {
        if token.trim().is_empty() {
            return Err(TokenError::Missing);
        }

        let token_data =
            decode::<TokenClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                TokenError::Invalid
            })?;

        let claims = token_data.claims;

        if claims.is_expired(now.timestamp()) {
            tracing::debug!(exp = claims.exp, "Token expired");
            return Err(TokenError::Expired);
        }

        let identity = claims.into_identity();
        if identity.is_empty() {
            return Err(TokenError::Invalid);
        }

        Ok(identity)
    }
}
