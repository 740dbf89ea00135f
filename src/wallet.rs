//! Injected wallet-provider capability.
//!
//! The browser extension owns the payer key; this crate only ever sees the
//! public key and fully signed transaction bytes. Connect/disconnect stay
//! with the host application; the flow requires an already-connected wallet.

use async_trait::async_trait;

use crate::error::WalletError;

#[async_trait(?Send)]
pub trait WalletProvider {
    fn is_connected(&self) -> bool;

    /// Base58 address of the connected account, if any.
    fn public_key(&self) -> Option<String>;

    /// Present the transaction for approval. The wait is unbounded: the
    /// user may leave the prompt open or cancel it, which surfaces as
    /// `WalletError::Rejected`.
    async fn sign_transaction(&self, transaction: &[u8]) -> Result<Vec<u8>, WalletError>;
}
