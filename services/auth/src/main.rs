use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod models;
mod repositories;
mod routes;
mod verifier;

#[cfg(test)]
mod test_support;

use common::{
    backend::{BackendClient, BackendConfig},
    cookie::CookieConfig,
    session::{SessionConfig, SessionTokenService},
};

use crate::{
    repositories::UserRepository,
    verifier::{VerifierConfig, WalletVerifier},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub backend: BackendClient,
    pub verifier: WalletVerifier,
    pub session_tokens: SessionTokenService,
    pub cookie_config: CookieConfig,
    pub user_repository: UserRepository,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting authentication service");

    // Initialize backend client
    let backend_config = BackendConfig::from_env()?;
    let backend = BackendClient::new(backend_config)?;

    // Check backend connectivity
    if backend.health_check().await? {
        info!("Backend connection successful");
    } else {
        anyhow::bail!("Failed to connect to backend");
    }

    // Initialize wallet verifier and session signing
    let verifier = WalletVerifier::new(VerifierConfig::from_env()?)?;
    let session_tokens = SessionTokenService::new(&SessionConfig::from_env()?);
    let cookie_config = CookieConfig::from_env()?;

    let user_repository = UserRepository::new(backend.admin()?);

    let app_state = AppState {
        backend,
        verifier,
        session_tokens,
        cookie_config,
        user_repository,
    };

    info!("Authentication service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let address = std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Authentication service listening on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
