//! Transaction wire helpers.
//!
//! The assembled transaction crosses the WASM boundary twice (out to the
//! wallet for the payer signature, back for submission) as bincode wire
//! bytes. This module adds the serialization and signature-slot plumbing the
//! flow needs on top of the SDK type.

use crate::error::MinterError;
use solana_address::Address;
use solana_signature::Signature;
use std::str::FromStr;

/// Re-export the underlying Solana Transaction type.
pub use solana_transaction::Transaction;

/// Extension trait for Transaction.
pub trait TransactionExt {
    /// Deserialize a transaction from raw bytes (wire format).
    fn from_bytes(bytes: &[u8]) -> Result<Transaction, MinterError>;

    /// Serialize transaction to bytes (wire format).
    fn to_bytes(&self) -> Result<Vec<u8>, MinterError>;

    /// Get the fee payer address as base58 string.
    fn fee_payer_string(&self) -> Option<String>;

    /// Get the number of instructions.
    fn num_instructions(&self) -> usize;

    /// Get the number of required signatures.
    fn num_signatures(&self) -> usize;

    /// Get the index of a pubkey in the account keys, if it's a signer.
    fn signer_index(&self, pubkey: &str) -> Option<usize>;

    /// Add a signature for a given public key.
    ///
    /// The pubkey must be one of the required signers in the transaction.
    /// The signature bytes must be exactly 64 bytes (Ed25519 signature).
    fn add_signature(&mut self, pubkey: &str, signature: &[u8]) -> Result<(), MinterError>;

    /// True when every required signature slot is filled.
    fn is_fully_signed(&self) -> bool;
}

impl TransactionExt for Transaction {
    fn from_bytes(bytes: &[u8]) -> Result<Transaction, MinterError> {
        bincode::deserialize(bytes)
            .map_err(|e| MinterError::Codec(format!("deserialize transaction: {}", e)))
    }

    fn to_bytes(&self) -> Result<Vec<u8>, MinterError> {
        bincode::serialize(self)
            .map_err(|e| MinterError::Codec(format!("serialize transaction: {}", e)))
    }

    fn fee_payer_string(&self) -> Option<String> {
        self.message.account_keys.first().map(|p| p.to_string())
    }

    fn num_instructions(&self) -> usize {
        self.message.instructions.len()
    }

    fn num_signatures(&self) -> usize {
        self.signatures.len()
    }

    fn signer_index(&self, pubkey: &str) -> Option<usize> {
        let target_address = Address::from_str(pubkey).ok()?;
        let num_signers = self.message.header.num_required_signatures as usize;

        // Same pattern as Solana's get_signing_keypair_positions
        let signed_keys = &self.message.account_keys[0..num_signers];
        signed_keys.iter().position(|x| *x == target_address)
    }

    fn add_signature(
        &mut self,
        pubkey: &str,
        signature_bytes: &[u8],
    ) -> Result<(), MinterError> {
        if signature_bytes.len() != 64 {
            return Err(MinterError::Codec(format!(
                "invalid signature length: expected 64 bytes, got {}",
                signature_bytes.len()
            )));
        }

        let signer_idx = self
            .signer_index(pubkey)
            .ok_or_else(|| MinterError::Codec(format!("unknown signer: {}", pubkey)))?;

        let signature = Signature::from(<[u8; 64]>::try_from(signature_bytes).unwrap());

        // Ensure the signature array covers every required signer slot.
        let num_signers = self.message.header.num_required_signatures as usize;
        if self.signatures.len() < num_signers {
            self.signatures.resize(num_signers, Signature::default());
        }

        self.signatures[signer_idx] = signature;
        Ok(())
    }

    fn is_fully_signed(&self) -> bool {
        let zero_sig = [0u8; 64];
        let num_signers = self.message.header.num_required_signatures as usize;
        self.signatures.len() >= num_signers
            && self.signatures[..num_signers]
                .iter()
                .all(|s| s.as_ref() != &zero_sig)
    }
}
