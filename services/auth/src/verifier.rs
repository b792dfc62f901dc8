//! Client for the wallet authentication verifier
//!
//! The verifier issues access tokens once a wallet signs a login challenge
//! on the client. This module exchanges such a token for its verified
//! claims through the verifier's `validate` endpoint.

use std::time::Duration;

use anyhow::Result;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{error, info, warn};

use common::session::unix_now;

/// Verifier configuration
#[derive(Debug, Clone)]
pub struct VerifierConfig {
    /// Project secret key, sent as the basic auth user name
    pub secret_key: String,
    /// Base URL of the verifier API
    pub api_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl VerifierConfig {
    /// Create a new VerifierConfig from environment variables
    ///
    /// # Environment Variables
    /// - `PICKET_PROJECT_SECRET_KEY`: Project secret key
    /// - `PICKET_API_URL`: Verifier API base URL (default: "https://picketapi.com/api/v1")
    /// - `PICKET_TIMEOUT`: Request timeout in seconds (default: 10)
    pub fn from_env() -> Result<Self> {
        let secret_key = std::env::var("PICKET_PROJECT_SECRET_KEY").map_err(|_| {
            anyhow::anyhow!("PICKET_PROJECT_SECRET_KEY environment variable not set")
        })?;

        let api_url = std::env::var("PICKET_API_URL")
            .unwrap_or_else(|_| "https://picketapi.com/api/v1".to_string());

        let timeout = std::env::var("PICKET_TIMEOUT")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);

        Ok(VerifierConfig {
            secret_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }
}

/// Claims the verifier vouches for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedClaims {
    pub wallet_address: String,
    pub chain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
    /// Expiration time
    pub exp: u64,
}

/// Errors raised while validating an access token
#[derive(Error, Debug)]
pub enum VerifierError {
    #[error("Access token rejected: {0}")]
    InvalidToken(String),

    #[error("Access token expired")]
    Expired,

    #[error("Verifier unavailable: status {0}")]
    Unavailable(u16),

    #[error("Verifier request error: {0}")]
    Request(#[from] reqwest::Error),
}

/// Wallet verifier client
#[derive(Clone)]
pub struct WalletVerifier {
    http: reqwest::Client,
    config: VerifierConfig,
}

impl WalletVerifier {
    /// Initialize a new verifier client
    pub fn new(config: VerifierConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        info!("Wallet verifier client initialized with URL: {}", config.api_url);
        Ok(WalletVerifier { http, config })
    }

    /// Validate an access token and return its claims
    pub async fn validate(&self, access_token: &str) -> Result<VerifiedClaims, VerifierError> {
        let response = self
            .http
            .post(format!("{}/auth/validate", self.config.api_url))
            .basic_auth(&self.config.secret_key, None::<&str>)
            .json(&json!({ "accessToken": access_token }))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("Wallet verifier is rate limiting requests");
            return Err(VerifierError::Unavailable(status.as_u16()));
        }
        if status.is_client_error() {
            let message = response.text().await.unwrap_or_default();
            if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
                error!(
                    "Wallet verifier refused the request ({}), check PICKET_PROJECT_SECRET_KEY: {}",
                    status, message
                );
            }
            return Err(VerifierError::InvalidToken(message));
        }
        if !status.is_success() {
            return Err(VerifierError::Unavailable(status.as_u16()));
        }

        let claims: VerifiedClaims = response.json().await?;
        if claims.exp <= unix_now() {
            return Err(VerifierError::Expired);
        }

        Ok(claims)
    }
}
