//! Session token signing and verification
//!
//! Session tokens are HS256 JWTs signed with the backend's JWT secret, so
//! the backend accepts them as bearer credentials and its row-level
//! policies can read the wallet claims. They are deliberately distinct from
//! the verifier's access tokens.

use anyhow::Result;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Audience and role the backend expects on user tokens
pub const AUTHENTICATED: &str = "authenticated";

/// Session token configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Shared secret for signing session tokens
    pub jwt_secret: String,
}

impl SessionConfig {
    /// Create a new SessionConfig from environment variables
    ///
    /// # Environment Variables
    /// - `SUPABASE_JWT_SECRET`: Secret the backend uses to verify user tokens
    pub fn from_env() -> Result<Self> {
        let jwt_secret = std::env::var("SUPABASE_JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("SUPABASE_JWT_SECRET environment variable not set"))?;

        if jwt_secret.is_empty() {
            anyhow::bail!("SUPABASE_JWT_SECRET must not be empty");
        }

        Ok(SessionConfig { jwt_secret })
    }
}

/// Errors raised while issuing or verifying a session token
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Session token expired")]
    Expired,

    #[error("Invalid session token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),
}

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Backend user id
    pub sub: Uuid,
    pub aud: String,
    pub role: String,
    #[serde(rename = "walletAddress")]
    pub wallet_address: String,
    pub chain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

impl SessionClaims {
    /// Build claims for an authenticated backend user
    pub fn new(
        sub: Uuid,
        wallet_address: &str,
        chain: &str,
        email: Option<String>,
        exp: u64,
    ) -> Self {
        Self {
            sub,
            aud: AUTHENTICATED.to_string(),
            role: AUTHENTICATED.to_string(),
            wallet_address: wallet_address.to_string(),
            chain: chain.to_string(),
            email,
            iat: unix_now(),
            exp,
        }
    }

    /// Seconds left before the token expires; negative once expired
    pub fn remaining_lifetime(&self) -> i64 {
        let exp = i64::try_from(self.exp).unwrap_or(i64::MAX);
        let now = i64::try_from(unix_now()).unwrap_or(i64::MAX);
        exp.saturating_sub(now)
    }
}

/// Signs and verifies session tokens
#[derive(Clone)]
pub struct SessionTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionTokenService {
    /// Initialize a new session token service
    pub fn new(config: &SessionConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_audience(&[AUTHENTICATED]);

        SessionTokenService {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Sign the claims into a session token
    pub fn issue(&self, claims: &SessionClaims) -> Result<String, TokenError> {
        if claims.remaining_lifetime() <= 0 {
            return Err(TokenError::Expired);
        }

        let token = encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate a session token and return its claims
    pub fn verify(&self, token: &str) -> Result<SessionClaims, TokenError> {
        match decode::<SessionClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(e) if matches!(e.kind(), jsonwebtoken::errors::ErrorKind::ExpiredSignature) => {
                Err(TokenError::Expired)
            }
            Err(e) => Err(TokenError::Invalid(e)),
        }
    }
}

/// Current time as seconds since the Unix epoch
pub fn unix_now() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}
