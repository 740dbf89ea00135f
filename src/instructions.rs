//! Instruction builders for the token-creation transaction.
//!
//! System-program instructions come from `solana-system-interface`; SPL token
//! instructions are constructed with packed instruction data and explicit
//! account lists so they compose with the 3.x SDK message types.

use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_system_interface::instruction as system_ix;
use spl_token::instruction::{AuthorityType, TokenInstruction};

/// Well-known program IDs and sysvars
pub mod program_ids {
    use super::Pubkey;

    // SPL Token Program: https://www.solana-program.com/docs/token
    pub fn token_program() -> Pubkey {
        "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA"
            .parse()
            .unwrap()
    }

    // Associated Token Account Program:
    // https://www.solana-program.com/docs/associated-token-account
    pub fn ata_program() -> Pubkey {
        "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL"
            .parse()
            .unwrap()
    }

    pub fn system_program() -> Pubkey {
        "11111111111111111111111111111111".parse().unwrap()
    }

    pub fn rent_sysvar() -> Pubkey {
        "SysvarRent111111111111111111111111111111111"
            .parse()
            .unwrap()
    }
}

/// Size of an SPL token mint account.
pub const MINT_ACCOUNT_SPACE: u64 = 82;

/// System transfer (used for the service-fee payment).
pub fn transfer(from: &Pubkey, to: &Pubkey, lamports: u64) -> Instruction {
    system_ix::transfer(from, to, lamports)
}

/// Create the mint account, funded with its rent-exempt minimum and owned by
/// the token program. The new account must co-sign.
pub fn create_mint_account(payer: &Pubkey, mint: &Pubkey, rent_lamports: u64) -> Instruction {
    system_ix::create_account(
        payer,
        mint,
        rent_lamports,
        MINT_ACCOUNT_SPACE,
        &program_ids::token_program(),
    )
}

/// Build an InitializeMint instruction.
///
/// A `None` freeze authority means no key will ever be able to freeze token
/// accounts of this mint.
pub fn initialize_mint(
    mint: &Pubkey,
    decimals: u8,
    mint_authority: &Pubkey,
    freeze_authority: Option<&Pubkey>,
) -> Instruction {
    // SPL Token InitializeMint (index 0): [0u8] + decimals + mint authority +
    // freeze authority as a one-byte-tagged option.
    let mut data = Vec::with_capacity(67);
    data.push(0u8);
    data.push(decimals);
    data.extend_from_slice(mint_authority.as_ref());
    match freeze_authority {
        Some(freeze) => {
            data.push(1u8);
            data.extend_from_slice(freeze.as_ref());
        }
        None => data.push(0u8),
    }

    Instruction::new_with_bytes(
        program_ids::token_program(),
        &data,
        vec![
            AccountMeta::new(*mint, false),
            AccountMeta::new_readonly(program_ids::rent_sysvar(), false),
        ],
    )
}

/// Derive the associated token account address for an owner and mint.
pub fn derive_associated_token_address(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    let token_program = program_ids::token_program();
    let seeds = &[owner.as_ref(), token_program.as_ref(), mint.as_ref()];
    let (ata, _bump) = Pubkey::find_program_address(seeds, &program_ids::ata_program());
    ata
}

/// Build the ATA-program Create instruction for the payer's associated
/// account of the new mint.
pub fn create_associated_token_account(
    payer: &Pubkey,
    associated_account: &Pubkey,
    owner: &Pubkey,
    mint: &Pubkey,
) -> Instruction {
    Instruction::new_with_bytes(
        program_ids::ata_program(),
        &[],
        vec![
            AccountMeta::new(*payer, true),
            AccountMeta::new(*associated_account, false),
            AccountMeta::new_readonly(*owner, false),
            AccountMeta::new_readonly(*mint, false),
            AccountMeta::new_readonly(program_ids::system_program(), false),
            AccountMeta::new_readonly(program_ids::token_program(), false),
        ],
    )
}

/// Build a MintTo instruction crediting `amount` base units.
pub fn mint_to(
    mint: &Pubkey,
    account: &Pubkey,
    mint_authority: &Pubkey,
    amount: u64,
) -> Instruction {
    let data = TokenInstruction::MintTo { amount }.pack();
    Instruction::new_with_bytes(
        program_ids::token_program(),
        &data,
        vec![
            AccountMeta::new(*mint, false),
            AccountMeta::new(*account, false),
            AccountMeta::new_readonly(*mint_authority, true),
        ],
    )
}

/// Build a SetAuthority instruction that nulls out an authority. Irreversible
/// on-chain once executed.
pub fn revoke_authority(
    mint: &Pubkey,
    current_authority: &Pubkey,
    authority_type: AuthorityType,
) -> Instruction {
    // SPL Token SetAuthority (index 6): [6u8] + authority type + a None tag
    // for the new authority.
    let data = vec![6u8, authority_type as u8, 0u8];
    Instruction::new_with_bytes(
        program_ids::token_program(),
        &data,
        vec![
            AccountMeta::new(*mint, false),
            AccountMeta::new_readonly(*current_authority, true),
        ],
    )
}
