//! Mock verifier and backend used by the handler and repository tests

use common::{
    backend::{BackendClient, BackendConfig},
    cookie::CookieConfig,
    session::{SessionConfig, SessionTokenService, unix_now},
};
use serde_json::json;
use uuid::Uuid;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path, query_param},
};

use crate::{
    AppState,
    repositories::UserRepository,
    verifier::{VerifierConfig, WalletVerifier},
};

pub const WALLET: &str = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F";
pub const CHAIN: &str = "ethereum";
pub const JWT_SECRET: &str = "test-jwt-secret";
pub const VALID_TOKEN: &str = "valid-access-token";

pub fn backend(server: &MockServer) -> BackendClient {
    BackendClient::new(BackendConfig {
        url: server.uri(),
        anon_key: "anon-key".to_string(),
        service_role_key: Some("service-key".to_string()),
        timeout: 5,
    })
    .unwrap()
}

pub fn app_state(server: &MockServer) -> AppState {
    let backend = backend(server);
    let verifier = WalletVerifier::new(VerifierConfig {
        secret_key: "project-secret".to_string(),
        api_url: format!("{}/picket", server.uri()),
        timeout: 5,
    })
    .unwrap();

    AppState {
        user_repository: UserRepository::new(backend.admin().unwrap()),
        backend,
        verifier,
        session_tokens: session_tokens(),
        cookie_config: CookieConfig { secure: true },
    }
}

pub fn session_tokens() -> SessionTokenService {
    SessionTokenService::new(&SessionConfig {
        jwt_secret: JWT_SECRET.to_string(),
    })
}

pub fn claims_json(exp: u64) -> serde_json::Value {
    json!({
        "walletAddress": WALLET,
        "chain": CHAIN,
        "displayAddress": "0x71C7...976F",
        "iat": unix_now(),
        "exp": exp
    })
}

/// Verifier accepting only `VALID_TOKEN`
pub async fn mount_verifier(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/picket/auth/validate"))
        .and(body_json(json!({ "accessToken": VALID_TOKEN })))
        .respond_with(ResponseTemplate::new(200).set_body_json(claims_json(unix_now() + 3600)))
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/picket/auth/validate"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "msg": "invalid token" })))
        .with_priority(10)
        .mount(server)
        .await;
}

pub fn mapping_json(user_id: Uuid) -> serde_json::Value {
    json!({ "user_id": user_id, "wallet_address": WALLET, "chain": CHAIN })
}

pub fn user_json(user_id: Uuid) -> serde_json::Value {
    json!({
        "id": user_id,
        "user_metadata": { "walletAddress": WALLET, "chain": CHAIN }
    })
}

/// Mapping lookup for the test wallet
pub fn wallet_lookup() -> wiremock::MockBuilder {
    Mock::given(method("GET"))
        .and(path("/rest/v1/user_wallets"))
        .and(query_param("wallet_address", format!("eq.{}", WALLET)))
        .and(query_param("chain", format!("eq.{}", CHAIN)))
}

/// Backend state for a wallet already mapped to `user_id`
pub async fn mount_existing_user(server: &MockServer, user_id: Uuid) {
    wallet_lookup()
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([mapping_json(user_id)])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/auth/v1/admin/users/{}", user_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(user_id)))
        .mount(server)
        .await;
}

/// Tutorial upsert answering with `status`
pub async fn mount_tutorials(server: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path("/rest/v1/tutorials"))
        .and(query_param("on_conflict", "name,wallet_address"))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!([])))
        .mount(server)
        .await;
}
