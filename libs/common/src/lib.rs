//! Common library for the walletgate services
//!
//! This crate provides functionality shared by the auth and api services:
//! the backend data client, session token signing, the session cookie,
//! shared records, input validation and error types.

pub mod backend;
pub mod cookie;
pub mod error;
pub mod models;
pub mod session;
pub mod validation;

/// Example usage of the backend module
///
/// ```rust,no_run
/// use common::backend::{BackendClient, BackendConfig};
/// use common::models::{TODOS_TABLE, Todo};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = BackendClient::new(BackendConfig::from_env()?)?;
///     let scoped = client.scoped(Some("session-token"));
///     let todos: Vec<Todo> = scoped.from(TODOS_TABLE).select_all().await?;
///     println!("Visible todos: {}", todos.len());
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
