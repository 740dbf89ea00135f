//! Token-creation request and form-boundary validation.
//!
//! The raw form arrives from JavaScript as strings; `TokenForm::validate`
//! normalizes and checks it before any wallet or network interaction. Symbol
//! input is uppercased and whitespace-stripped first, then length-capped, so
//! `" dmo "` and `"DMO"` are the same symbol.

use serde::{Deserialize, Serialize};

use crate::error::FormError;

pub const MAX_NAME_LEN: usize = 32;
pub const MAX_SYMBOL_LEN: usize = 8;
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Decimal configurations offered by the form (utility and standard).
pub const SUPPORTED_DECIMALS: [u8; 2] = [6, 9];

/// The three independently selectable authority revocations.
///
/// Each one is irreversible on-chain; together they only influence the fee
/// and which instructions the assembler appends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RevokeFlags {
    pub freeze: bool,
    pub mint: bool,
    pub update: bool,
}

impl RevokeFlags {
    pub fn count(&self) -> u32 {
        u32::from(self.freeze) + u32::from(self.mint) + u32::from(self.update)
    }
}

/// Raw form state as the host application submits it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenForm {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Whole-token supply as typed by the user.
    pub supply: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub revoke: RevokeFlags,
}

/// A validated request, ready for assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCreationRequest {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Whole tokens; base units are `supply * 10^decimals`.
    pub supply: u64,
    pub description: String,
    /// Filled in after the image upload succeeds.
    pub image_url: String,
    pub revoke: RevokeFlags,
}

impl TokenForm {
    /// Validate and normalize the form into a `TokenCreationRequest`.
    pub fn validate(&self) -> Result<TokenCreationRequest, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::NameRequired);
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(FormError::NameTooLong);
        }

        let symbol: String = self
            .symbol
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();
        if symbol.is_empty() {
            return Err(FormError::SymbolRequired);
        }
        if symbol.chars().count() > MAX_SYMBOL_LEN {
            return Err(FormError::SymbolTooLong);
        }

        if self.description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(FormError::DescriptionTooLong);
        }

        if !SUPPORTED_DECIMALS.contains(&self.decimals) {
            return Err(FormError::UnsupportedDecimals(self.decimals));
        }

        let supply: u64 = self
            .supply
            .trim()
            .parse()
            .map_err(|_| FormError::InvalidSupply)?;
        if supply == 0 {
            return Err(FormError::InvalidSupply);
        }

        let request = TokenCreationRequest {
            name: name.to_string(),
            symbol,
            decimals: self.decimals,
            supply,
            description: self.description.clone(),
            image_url: String::new(),
            revoke: self.revoke,
        };
        // Reject amounts the token program cannot represent before anything
        // else runs.
        request.base_units()?;
        Ok(request)
    }
}

impl TokenCreationRequest {
    /// Initial mint amount in base units.
    pub fn base_units(&self) -> Result<u64, FormError> {
        let scale = 10u64
            .checked_pow(u32::from(self.decimals))
            .ok_or(FormError::SupplyOutOfRange)?;
        self.supply
            .checked_mul(scale)
            .ok_or(FormError::SupplyOutOfRange)
    }
}
