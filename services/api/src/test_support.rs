//! Session and backend fakes used by the handler tests

use std::sync::{Arc, Mutex};

use common::{
    backend::{BackendClient, BackendConfig},
    models::Todo,
    session::{SessionClaims, SessionConfig, SessionTokenService, unix_now},
};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;
use wiremock::{
    Mock, MockServer, Request, Respond, ResponseTemplate,
    matchers::{header, path},
};

use crate::state::AppState;

pub const WALLET: &str = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F";
pub const JWT_SECRET: &str = "test-jwt-secret";

pub fn app_state(server: &MockServer) -> AppState {
    AppState {
        backend: BackendClient::new(BackendConfig {
            url: server.uri(),
            anon_key: "anon-key".to_string(),
            service_role_key: None,
            timeout: 5,
        })
        .unwrap(),
        session_tokens: session_tokens(),
    }
}

pub fn session_tokens() -> SessionTokenService {
    SessionTokenService::new(&SessionConfig {
        jwt_secret: JWT_SECRET.to_string(),
    })
}

/// `Cookie` header value carrying a fresh session for `WALLET`
pub fn session_cookie() -> String {
    let claims = SessionClaims::new(Uuid::new_v4(), WALLET, "ethereum", None, unix_now() + 3600);
    format!("sb-access-token={}", session_tokens().issue(&claims).unwrap())
}

/// Sign claims without the expiry check applied on issue
pub fn sign_unchecked(claims: &SessionClaims) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

/// In-memory `todos` table speaking enough PostgREST for the handlers
#[derive(Clone, Default)]
pub struct FakeTodos {
    rows: Arc<Mutex<Vec<Todo>>>,
}

impl FakeTodos {
    pub fn rows(&self) -> Vec<Todo> {
        self.rows.lock().unwrap().clone()
    }

    /// Serve the table to requests carrying the session in `cookie`
    pub async fn mount(&self, server: &MockServer, cookie: &str) {
        let token = cookie.trim_start_matches("sb-access-token=");

        Mock::given(path("/rest/v1/todos"))
            .and(header("authorization", format!("Bearer {}", token)))
            .respond_with(self.clone())
            .mount(server)
            .await;
    }
}

impl Respond for FakeTodos {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut rows = self.rows.lock().unwrap();

        match request.method.as_str() {
            "GET" => ResponseTemplate::new(200).set_body_json(&*rows),
            "POST" => {
                let incoming: Vec<Todo> = match serde_json::from_slice(&request.body) {
                    Ok(incoming) => incoming,
                    Err(_) => return ResponseTemplate::new(400),
                };
                let merge = request
                    .headers
                    .get("prefer")
                    .and_then(|value| value.to_str().ok())
                    .is_some_and(|value| value.contains("merge-duplicates"));

                for todo in &incoming {
                    let existing = rows.iter_mut().find(|row| {
                        row.name == todo.name && row.wallet_address == todo.wallet_address
                    });
                    match existing {
                        Some(row) if merge => *row = todo.clone(),
                        Some(_) => return ResponseTemplate::new(409),
                        None => rows.push(todo.clone()),
                    }
                }

                ResponseTemplate::new(201).set_body_json(&incoming)
            }
            _ => ResponseTemplate::new(405),
        }
    }
}
