//! Ed25519 keypair used as the mint identity.
//!
//! A fresh keypair is generated per creation; its public half becomes the
//! token's permanent address and its secret half co-signs the assembled
//! transaction exactly once before being dropped.

use crate::error::MinterError;

/// Re-export the underlying Solana Keypair type.
pub use solana_keypair::Keypair;

/// Extension trait adding the accessors the assembler needs.
pub trait KeypairExt {
    fn from_secret_key_bytes(secret_key: &[u8]) -> Result<Keypair, MinterError>;
    fn public_key_bytes(&self) -> [u8; 32];
    fn address(&self) -> String;
}

impl KeypairExt for Keypair {
    /// Create a keypair from a 32-byte secret key (Ed25519 seed).
    fn from_secret_key_bytes(secret_key: &[u8]) -> Result<Keypair, MinterError> {
        let bytes: [u8; 32] = secret_key.try_into().map_err(|_| {
            MinterError::Codec(format!(
                "secret key must be 32 bytes, got {}",
                secret_key.len()
            ))
        })?;
        Ok(Keypair::new_from_array(bytes))
    }

    /// Get the public key bytes (32 bytes).
    fn public_key_bytes(&self) -> [u8; 32] {
        use solana_signer::Signer;
        self.pubkey().to_bytes()
    }

    /// Get the Solana address (base58-encoded public key).
    fn address(&self) -> String {
        use solana_signer::Signer;
        self.pubkey().to_string()
    }
}
