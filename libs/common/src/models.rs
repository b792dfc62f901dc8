//! Records shared by the auth and api services

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Table holding per-wallet to-do items
pub const TODOS_TABLE: &str = "todos";
/// Table holding per-wallet tutorial completion flags
pub const TUTORIALS_TABLE: &str = "tutorials";
/// Name of the tutorial marked completed on login
pub const TUTORIAL_NAME: &str = "Picket + Supabase Tutorial";
/// Conflict target shared by both tables
pub const NAME_WALLET_CONFLICT: &str = "name,wallet_address";

/// To-do item owned by a single wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub wallet_address: String,
    pub name: String,
    pub completed: bool,
}

impl Todo {
    pub fn new(wallet_address: &str, name: &str, completed: bool) -> Self {
        Self {
            wallet_address: wallet_address.to_string(),
            name: name.to_string(),
            completed,
        }
    }
}

/// Starter to-do list created on a wallet's first visit
pub fn default_todos(wallet_address: &str) -> Vec<Todo> {
    vec![
        Todo::new(wallet_address, "Complete the Picket + Supabase Tutorial", true),
        Todo::new(
            wallet_address,
            "Create a Picket Account (https://picketapi.com/)",
            false,
        ),
        Todo::new(
            wallet_address,
            "Read the Picket Docs (https://docs.picketapi.com/)",
            false,
        ),
        Todo::new(wallet_address, "Build an Awesome Web3 Experience", false),
    ]
}

/// Tutorial completion flag keyed by (name, wallet address)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tutorial {
    pub wallet_address: String,
    pub name: String,
    pub completed: bool,
}

/// User record managed by the backend's auth service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: serde_json::Value,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Shorten a wallet address to `0x1234...abcd` for display
pub fn display_wallet_address(wallet_address: &str) -> String {
    let chars: Vec<char> = wallet_address.chars().collect();
    let head: String = chars.iter().take(6).collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{}...{}", head, tail)
}
