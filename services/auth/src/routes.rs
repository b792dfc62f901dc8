//! Authentication service routes

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use common::{
    cookie::{cleared_session_cookie, session_cookie},
    session::{SessionClaims, TokenError},
    validation::validate_access_token,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};

use crate::{AppState, repositories::complete_tutorial, verifier::VerifierError};

/// Request for wallet login
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub access_token: String,
}

/// Create the router for the authentication service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "auth-service"
    }))
}

/// Exchange a verifier access token for a session cookie
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AuthError> {
    validate_access_token(&payload.access_token).map_err(AuthError::BadRequest)?;

    let claims = state
        .verifier
        .validate(&payload.access_token)
        .await
        .map_err(|e| match e {
            VerifierError::InvalidToken(_) | VerifierError::Expired => {
                warn!("Access token rejected: {}", e);
                AuthError::Unauthorized
            }
            _ => {
                error!("Failed to validate access token: {}", e);
                AuthError::BadGateway
            }
        })?;

    info!(
        "Login attempt for wallet {} on {}",
        claims.wallet_address, claims.chain
    );

    let user = state
        .user_repository
        .find_or_create(&claims)
        .await
        .map_err(|e| {
            error!("Failed to resolve backend user: {}", e);
            AuthError::BadGateway
        })?;

    let session = SessionClaims::new(
        user.id,
        &claims.wallet_address,
        &claims.chain,
        claims.email.clone(),
        claims.exp,
    );

    let token = state.session_tokens.issue(&session).map_err(|e| match e {
        TokenError::Expired => {
            warn!("Access token expired before session was issued");
            AuthError::Unauthorized
        }
        _ => {
            error!("Failed to sign session token: {}", e);
            AuthError::InternalServerError
        }
    })?;

    let client = state.backend.scoped(Some(&token));
    if let Err(e) = complete_tutorial(&client, &claims.wallet_address).await {
        warn!("Failed to record tutorial completion: {}", e);
    }

    let cookie = session_cookie(token, session.remaining_lifetime(), &state.cookie_config);
    info!("Session issued for backend user {}", user.id);

    Ok((StatusCode::OK, jar.add(cookie), Json(json!({}))))
}

/// Clear the session cookie
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    info!("Logout request");

    (StatusCode::OK, jar.add(cleared_session_cookie()), Json(json!({})))
}

/// Custom error type for authentication errors
#[derive(Debug)]
pub enum AuthError {
    BadRequest(String),
    Unauthorized,
    BadGateway,
    InternalServerError,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AuthError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AuthError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AuthError::BadGateway => (
                StatusCode::BAD_GATEWAY,
                "Upstream service error".to_string(),
            ),
            AuthError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
