//! Error taxonomy for the token-creation flow.
//!
//! Validation errors are raised before any network call, wallet errors keep
//! user rejection distinct from an extension-imposed block, endpoint errors
//! cover rent/blockhash/send failures, and a confirmed-but-failed transaction
//! is its own case carrying the signature. Everything converts to a real
//! JavaScript `Error` at the WASM boundary.

use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Form-boundary validation failures. Raised before the wallet or the
/// network is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("token name is required")]
    NameRequired,
    #[error("token name is limited to 32 characters")]
    NameTooLong,
    #[error("token symbol is required")]
    SymbolRequired,
    #[error("token symbol is limited to 8 characters")]
    SymbolTooLong,
    #[error("description is limited to 500 characters")]
    DescriptionTooLong,
    #[error("decimals must be 6 or 9, got {0}")]
    UnsupportedDecimals(u8),
    #[error("supply must be a positive whole number")]
    InvalidSupply,
    #[error("supply exceeds the representable token amount")]
    SupplyOutOfRange,
    #[error("a token image is required")]
    ImageRequired,
}

/// Wallet-provider failures. `Rejected` is the user declining in the
/// extension prompt and is never retried; `Blocked` means the extension
/// itself refused and the user must override it there.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("transaction rejected by user")]
    Rejected,
    #[error("wallet blocked the transaction; approve it in the extension")]
    Blocked,
    #[error("wallet is not connected")]
    Disconnected,
    #[error("wallet error: {0}")]
    Other(String),
}

/// Failures reported by the injected RPC endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    #[error("rent lookup failed: {0}")]
    RentLookup(String),
    #[error("blockhash fetch failed: {0}")]
    Blockhash(String),
    #[error("transaction send failed: {0}")]
    Send(String),
    #[error("confirmation failed: {0}")]
    Confirm(String),
}

/// A single image-upload attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("upload failed: {0}")]
pub struct UploadError(pub String);

/// Top-level error for the creation flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MinterError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Wallet(#[from] WalletError),
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
    #[error("invalid minter configuration: {0}")]
    Config(String),
    #[error("image upload failed after {attempts} attempts: {reason}")]
    UploadFailed { attempts: u32, reason: String },
    /// The cluster accepted the transaction but reported it failed on-chain.
    #[error("transaction {signature} failed on-chain: {reason}")]
    TransactionFailed { signature: String, reason: String },
    #[error("transaction encoding failed: {0}")]
    Codec(String),
    #[error("a token creation is already in progress")]
    AlreadyInFlight,
}

impl MinterError {
    /// True when re-triggering the flow cannot help (the user said no).
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, MinterError::Wallet(WalletError::Rejected))
    }
}

// Required for wasm_bindgen to convert errors to JavaScript exceptions
// Uses js_sys::Error to create a proper JavaScript Error with stack trace
impl From<MinterError> for JsValue {
    fn from(err: MinterError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

impl From<FormError> for JsValue {
    fn from(err: FormError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
