//! Authentication service models

pub mod user;

// Re-export for convenience
pub use user::{NewBackendUser, USER_WALLETS_TABLE, UserWallet, WALLET_CHAIN_CONFLICT};
