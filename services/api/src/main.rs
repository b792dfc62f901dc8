use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod error;
mod middleware;
mod models;
mod repositories;
mod routes;
mod state;

#[cfg(test)]
mod test_support;

use common::{
    backend::{BackendClient, BackendConfig},
    session::{SessionConfig, SessionTokenService},
};

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting API service");

    // Initialize backend client
    let backend_config = BackendConfig::from_env()?;
    let backend = BackendClient::new(backend_config)?;

    // Check backend connectivity
    if backend.health_check().await? {
        info!("Backend connection successful");
    } else {
        anyhow::bail!("Failed to connect to backend");
    }

    let session_tokens = SessionTokenService::new(&SessionConfig::from_env()?);

    let app_state = AppState {
        backend,
        session_tokens,
    };

    info!("API service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let address = std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3001".to_string());
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("API service listening on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
