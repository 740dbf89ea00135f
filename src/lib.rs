//! wasm-minter: client-side SPL token creation for browser wallets.
//!
//! Assembles the single atomic transaction that creates a token mint, funds
//! the creator's associated token account, mints the initial supply,
//! optionally revokes mint/freeze authorities, and pays the operator service
//! fee. The connected wallet extension signs; an injected RPC endpoint
//! confirms.
//!
//! # Architecture
//!
//! The crate follows a two-layer architecture:
//!
//! 1. **Core types and flow** (`request`, `fee`, `assemble`, `submit`,
//!    `flow`) - pure Rust over injected collaborator traits; natively testable.
//! 2. **WASM bindings** (`wasm/`) - thin wrappers exposing the core to
//!    JavaScript and adapting the host's wallet/connection/storage objects to
//!    the collaborator traits.
//!
//! # Usage from Rust
//!
//! ```rust
//! use wasm_minter::{plan, RevokeFlags, ServiceFee};
//!
//! let revoke = RevokeFlags { mint: true, ..RevokeFlags::default() };
//!
//! // 0.1 SOL base + 0.05 per revoked authority
//! let fee = ServiceFee::quote(&revoke);
//! assert_eq!(fee.display_sol(), "0.15");
//!
//! // fee, create account, init mint, create ATA, mint-to, revoke mint
//! assert_eq!(plan(&revoke).len(), 6);
//! ```

pub mod assemble;
pub mod config;
mod error;
pub mod fee;
pub mod flow;
pub mod instructions;
pub mod keypair;
pub mod metadata;
pub mod network;
pub mod progress;
pub mod request;
pub mod submit;
pub mod transaction;
pub mod upload;
pub mod validate;
pub mod wallet;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

// Re-export core types at crate root
pub use assemble::{assemble, build_step, plan, AssembledToken, Step, StepContext};
pub use config::MinterConfig;
pub use error::{EndpointError, FormError, MinterError, UploadError, WalletError};
pub use fee::ServiceFee;
pub use flow::{CreatedToken, CreationOutcome, TokenCreator, TokenSummary};
pub use keypair::{Keypair, KeypairExt};
pub use metadata::TokenMetadata;
pub use network::{ChainEndpoint, TransactionStatus};
pub use progress::{Progress, ProgressSink};
pub use request::{RevokeFlags, TokenCreationRequest, TokenForm};
pub use submit::submit_and_confirm;
pub use transaction::{Transaction, TransactionExt};
pub use upload::{ImageFile, ImageStore, Sleeper};
pub use validate::{StubValidator, TokenValidator, ValidationReport, ValidationStatus};
pub use wallet::WalletProvider;

// Re-export WASM types
#[cfg(target_arch = "wasm32")]
pub use wasm::{JsChainEndpoint, JsImageStore, JsWalletProvider, WasmMinter};
