//! Session extraction from the session cookie

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;
use common::{cookie::session_token, session::SessionClaims};
use tracing::warn;

use crate::{error::ApiError, state::AppState};

/// Verified session of the requesting wallet
#[derive(Debug, Clone)]
pub struct Session {
    /// Raw session token, forwarded to the backend as bearer credential
    pub token: String,
    pub claims: SessionClaims,
}

impl Session {
    pub fn wallet_address(&self) -> &str {
        &self.claims.wallet_address
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = session_token(&jar).ok_or(ApiError::Unauthorized)?;

        let claims = state.session_tokens.verify(&token).map_err(|e| {
            warn!("Rejected session cookie: {}", e);
            ApiError::Unauthorized
        })?;

        Ok(Session { token, claims })
    }
}
