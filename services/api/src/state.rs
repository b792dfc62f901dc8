//! Application state shared across handlers

use common::{backend::BackendClient, session::SessionTokenService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub backend: BackendClient,
    pub session_tokens: SessionTokenService,
}
