//! Minter configuration supplied by the host application.

use serde::Deserialize;
use solana_sdk::pubkey::Pubkey;

use crate::error::MinterError;

/// Operator wallet that collects service fees.
pub const DEFAULT_FEE_WALLET: &str = "GQ95MH74f2kF6Aqv5dy6PSKq3S1xfwQowwYYqVQPNTMe";

/// Cluster name used for explorer links.
pub const DEFAULT_CLUSTER: &str = "mainnet-beta";

/// Configuration for the creation flow. Deserialized from a plain JS object;
/// every field has a default so `{}` (or nothing) is a valid config.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MinterConfig {
    /// Base58 address of the operator fee wallet.
    pub fee_wallet: String,
    /// Cluster name appended to explorer links.
    pub cluster: String,
}

impl Default for MinterConfig {
    fn default() -> Self {
        MinterConfig {
            fee_wallet: DEFAULT_FEE_WALLET.to_string(),
            cluster: DEFAULT_CLUSTER.to_string(),
        }
    }
}

impl MinterConfig {
    pub fn fee_wallet_pubkey(&self) -> Result<Pubkey, MinterError> {
        self.fee_wallet
            .parse()
            .map_err(|_| MinterError::Config(format!("invalid fee wallet: {}", self.fee_wallet)))
    }

    /// Explorer link for a confirmed transaction.
    pub fn explorer_tx_url(&self, signature: &str) -> String {
        format!(
            "https://explorer.solana.com/tx/{}?cluster={}",
            signature, self.cluster
        )
    }
}
