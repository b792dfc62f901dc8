//! To-do repository scoped to one session

use common::{
    backend::ScopedClient,
    error::BackendResult,
    models::{NAME_WALLET_CONFLICT, TODOS_TABLE, Todo, default_todos},
};
use tracing::info;

/// To-do repository
///
/// Every query runs with the session's credential, so row-level policies
/// restrict it to the session's wallet.
pub struct TodoRepository {
    client: ScopedClient,
}

impl TodoRepository {
    /// Create a new to-do repository
    pub fn new(client: ScopedClient) -> Self {
        Self { client }
    }

    /// Get all to-do items visible to the session
    pub async fn list(&self) -> BackendResult<Vec<Todo>> {
        self.client.from(TODOS_TABLE).select_all().await
    }

    /// Insert the starter to-do list for a wallet
    pub async fn create_defaults(&self, wallet_address: &str) -> BackendResult<Vec<Todo>> {
        info!("Creating default todos for wallet {}", wallet_address);

        self.client
            .from(TODOS_TABLE)
            .insert(&default_todos(wallet_address))
            .await
    }

    /// Get the wallet's to-do items, creating the starter list when there are none
    pub async fn list_or_create_defaults(&self, wallet_address: &str) -> BackendResult<Vec<Todo>> {
        let todos = self.list().await?;
        if !todos.is_empty() {
            return Ok(todos);
        }

        self.create_defaults(wallet_address).await
    }

    /// Set the completion of the item keyed by (name, wallet address)
    pub async fn set_completed(
        &self,
        wallet_address: &str,
        name: &str,
        completed: bool,
    ) -> BackendResult<Todo> {
        let todo = Todo::new(wallet_address, name, completed);

        let stored: Vec<Todo> = self
            .client
            .from(TODOS_TABLE)
            .upsert(&[todo.clone()], NAME_WALLET_CONFLICT)
            .await?;

        Ok(stored.into_iter().next().unwrap_or(todo))
    }
}
