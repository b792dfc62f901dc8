//! Wallet-to-user mapping and backend user creation payloads

use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::verifier::VerifiedClaims;

/// Table mapping wallets to backend users
pub const USER_WALLETS_TABLE: &str = "user_wallets";
/// Unique key of the mapping table
pub const WALLET_CHAIN_CONFLICT: &str = "wallet_address,chain";

/// Mapping row, unique on (wallet_address, chain)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserWallet {
    pub user_id: Uuid,
    pub wallet_address: String,
    pub chain: String,
}

/// Backend user creation payload
#[derive(Debug, Clone, Serialize)]
pub struct NewBackendUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub email_confirm: bool,
    pub user_metadata: serde_json::Value,
}

impl NewBackendUser {
    /// Payload embedding the wallet, chain and verified claims as metadata
    pub fn from_claims(claims: &VerifiedClaims) -> Self {
        Self {
            email: claims.email.clone(),
            email_confirm: claims.email.is_some(),
            user_metadata: json!({
                "walletAddress": claims.wallet_address,
                "chain": claims.chain,
                "claims": claims,
            }),
        }
    }
}
