//! Repositories for backend operations

use common::{
    backend::ScopedClient,
    error::BackendResult,
    models::{TUTORIAL_NAME, TUTORIALS_TABLE, Tutorial},
};

pub mod todo;

pub use todo::TodoRepository;

/// Whether the wallet behind `client` has completed the tutorial
pub async fn tutorial_completed(client: &ScopedClient, wallet_address: &str) -> BackendResult<bool> {
    let rows: Vec<Tutorial> = client
        .from(TUTORIALS_TABLE)
        .select_eq(&[("name", TUTORIAL_NAME), ("wallet_address", wallet_address)])
        .await?;

    Ok(rows.iter().any(|row| row.completed))
}
