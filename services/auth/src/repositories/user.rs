//! User repository resolving wallets to backend users

use anyhow::Result;
use common::{backend::AdminClient, models::BackendUser};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    models::{NewBackendUser, USER_WALLETS_TABLE, UserWallet, WALLET_CHAIN_CONFLICT},
    verifier::VerifiedClaims,
};

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    admin: AdminClient,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(admin: AdminClient) -> Self {
        Self { admin }
    }

    /// Find the wallet mapping for (wallet address, chain)
    pub async fn find_wallet(&self, wallet_address: &str, chain: &str) -> Result<Option<UserWallet>> {
        let rows: Vec<UserWallet> = self
            .admin
            .from(USER_WALLETS_TABLE)
            .select_eq(&[("wallet_address", wallet_address), ("chain", chain)])
            .await?;

        Ok(rows.into_iter().next())
    }

    /// Find a backend user by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<BackendUser> {
        self.admin
            .get_user(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Backend user {} not found", id))
    }

    /// Resolve the backend user for a wallet, creating it on first login
    ///
    /// The mapping table is unique on (wallet address, chain). When two first
    /// logins race, the mapping insert of the loser is ignored; the loser then
    /// deletes the user it just created and adopts the winner's.
    pub async fn find_or_create(&self, claims: &VerifiedClaims) -> Result<BackendUser> {
        if let Some(mapping) = self
            .find_wallet(&claims.wallet_address, &claims.chain)
            .await?
        {
            return self.find_by_id(mapping.user_id).await;
        }

        let created = self
            .admin
            .create_user(&NewBackendUser::from_claims(claims))
            .await?;
        info!(
            "Created backend user {} for wallet {} on {}",
            created.id, claims.wallet_address, claims.chain
        );

        let mapping = UserWallet {
            user_id: created.id,
            wallet_address: claims.wallet_address.clone(),
            chain: claims.chain.clone(),
        };
        let inserted: Vec<UserWallet> = match self
            .admin
            .from(USER_WALLETS_TABLE)
            .insert_ignore_duplicates(&[mapping], WALLET_CHAIN_CONFLICT)
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                warn!(
                    "Failed to map wallet {} to user {}: {}",
                    claims.wallet_address, created.id, e
                );
                self.discard_user(created.id).await;
                return Err(e.into());
            }
        };

        if !inserted.is_empty() {
            return Ok(created);
        }

        let winner = self
            .find_wallet(&claims.wallet_address, &claims.chain)
            .await?
            .ok_or_else(|| {
                anyhow::anyhow!("Wallet mapping for {} vanished", claims.wallet_address)
            })?;
        warn!(
            "Concurrent first login for wallet {}; adopting user {}",
            claims.wallet_address, winner.user_id
        );

        self.discard_user(created.id).await;

        self.find_by_id(winner.user_id).await
    }

    /// Delete a backend user that never got a wallet mapping
    async fn discard_user(&self, id: Uuid) {
        if let Err(e) = self.admin.delete_user(id).await {
            warn!("Failed to delete orphan backend user {}: {}", id, e);
        }
    }
}
