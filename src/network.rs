//! Injected RPC endpoint capability.
//!
//! The flow never talks to a cluster directly; everything goes through this
//! trait so the WASM layer can adapt a web3.js-style connection and tests can
//! substitute a double.

use async_trait::async_trait;
use solana_sdk::hash::Hash;

use crate::error::EndpointError;

/// Confirmation status for a submitted transaction.
///
/// A populated `err` means the cluster accepted the submission but the
/// transaction failed on-chain; acceptance is not success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionStatus {
    pub err: Option<String>,
}

impl TransactionStatus {
    pub fn ok() -> TransactionStatus {
        TransactionStatus { err: None }
    }
}

/// Network endpoint the assembler and submitter depend on.
#[async_trait(?Send)]
pub trait ChainEndpoint {
    /// Rent-exempt minimum balance for an account of the given size.
    async fn minimum_balance_for_rent_exemption(&self, space: u64) -> Result<u64, EndpointError>;

    /// Current blockhash binding the transaction's validity window.
    async fn latest_blockhash(&self) -> Result<Hash, EndpointError>;

    /// Send a serialized signed transaction without skipping preflight
    /// checks. Resolves with the transaction signature.
    async fn send_transaction(&self, transaction: &[u8]) -> Result<String, EndpointError>;

    /// Wait for the transaction to reach "confirmed" commitment.
    async fn confirm_transaction(&self, signature: &str)
        -> Result<TransactionStatus, EndpointError>;
}
