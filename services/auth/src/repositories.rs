//! Repositories for backend operations

use common::{
    backend::ScopedClient,
    error::BackendResult,
    models::{NAME_WALLET_CONFLICT, TUTORIAL_NAME, TUTORIALS_TABLE, Tutorial},
};

pub mod user;

pub use user::UserRepository;

/// Record that the wallet behind `client` completed the tutorial
pub async fn complete_tutorial(client: &ScopedClient, wallet_address: &str) -> BackendResult<()> {
    let row = Tutorial {
        wallet_address: wallet_address.to_string(),
        name: TUTORIAL_NAME.to_string(),
        completed: true,
    };

    let _: Vec<Tutorial> = client
        .from(TUTORIALS_TABLE)
        .upsert(&[row], NAME_WALLET_CONFLICT)
        .await?;

    Ok(())
}
