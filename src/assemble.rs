//! Token-creation transaction assembly.
//!
//! The transaction is planned as an ordered list of steps, each mapping to
//! exactly one instruction. Order matters: later instructions operate on
//! accounts created earlier in the same transaction. The assembled
//! transaction is bound to one blockhash and co-signed by the fresh mint
//! keypair; the payer's signature slot stays open for the wallet.

use solana_sdk::hash::Hash;
use solana_sdk::instruction::Instruction;
use solana_sdk::message::Message;
use solana_sdk::pubkey::Pubkey;
use spl_token::instruction::AuthorityType;

use crate::error::MinterError;
use crate::fee::ServiceFee;
use crate::instructions::{self, MINT_ACCOUNT_SPACE};
use crate::keypair::{Keypair, KeypairExt};
use crate::network::ChainEndpoint;
use crate::request::TokenCreationRequest;
use crate::transaction::{Transaction, TransactionExt};

/// One step of the creation plan. Each step builds exactly one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Service fee to the operator wallet.
    FeeTransfer,
    /// Fund and allocate the mint account (co-signed by the mint keypair).
    CreateMintAccount,
    /// Set decimals and authorities on the new mint.
    InitializeMint,
    /// Create the payer's associated token account for the mint.
    CreateAssociatedAccount,
    /// Credit the initial supply to the associated account.
    MintInitialSupply,
    /// Null out the mint authority.
    RevokeMintAuthority,
    /// Null out the freeze authority (only reachable when it was retained at
    /// initialization).
    RevokeFreezeAuthority,
}

/// Build the ordered step list for a revoke selection.
///
/// Always `5 + revoke.mint + revoke.freeze` steps; the update flag changes
/// the fee but appends nothing.
pub fn plan(revoke: &crate::request::RevokeFlags) -> Vec<Step> {
    let mut steps = vec![
        Step::FeeTransfer,
        Step::CreateMintAccount,
        Step::InitializeMint,
        Step::CreateAssociatedAccount,
        Step::MintInitialSupply,
    ];
    if revoke.mint {
        steps.push(Step::RevokeMintAuthority);
    }
    if revoke.freeze {
        steps.push(Step::RevokeFreezeAuthority);
    }
    steps
}

/// Everything a step needs to turn into an instruction.
#[derive(Debug, Clone)]
pub struct StepContext {
    pub payer: Pubkey,
    pub mint: Pubkey,
    pub associated_account: Pubkey,
    pub fee_wallet: Pubkey,
    pub fee_lamports: u64,
    pub rent_lamports: u64,
    pub decimals: u8,
    pub base_units: u64,
    /// Freeze authority retained at initialization (false when the freeze
    /// revoke was requested, in which case it is never set at all).
    pub retain_freeze: bool,
}

/// Map a step to its instruction.
pub fn build_step(step: Step, ctx: &StepContext) -> Instruction {
    match step {
        Step::FeeTransfer => {
            instructions::transfer(&ctx.payer, &ctx.fee_wallet, ctx.fee_lamports)
        }
        Step::CreateMintAccount => {
            instructions::create_mint_account(&ctx.payer, &ctx.mint, ctx.rent_lamports)
        }
        Step::InitializeMint => instructions::initialize_mint(
            &ctx.mint,
            ctx.decimals,
            &ctx.payer,
            ctx.retain_freeze.then_some(&ctx.payer),
        ),
        Step::CreateAssociatedAccount => instructions::create_associated_token_account(
            &ctx.payer,
            &ctx.associated_account,
            &ctx.payer,
            &ctx.mint,
        ),
        Step::MintInitialSupply => instructions::mint_to(
            &ctx.mint,
            &ctx.associated_account,
            &ctx.payer,
            ctx.base_units,
        ),
        Step::RevokeMintAuthority => {
            instructions::revoke_authority(&ctx.mint, &ctx.payer, AuthorityType::MintTokens)
        }
        Step::RevokeFreezeAuthority => {
            instructions::revoke_authority(&ctx.mint, &ctx.payer, AuthorityType::FreezeAccount)
        }
    }
}

/// Result of a successful assembly.
#[derive(Debug, Clone)]
pub struct AssembledToken {
    /// Co-signed by the mint keypair; payer slot open for the wallet.
    pub transaction: Transaction,
    /// Base58 address of the new mint.
    pub mint_address: String,
    pub fee: ServiceFee,
}

/// Assemble the complete creation transaction.
///
/// Any endpoint failure aborts the whole assembly; no partial transaction is
/// returned. The generated mint secret is dropped when this function
/// returns; only its signature survives.
pub async fn assemble<E>(
    endpoint: &E,
    request: &TokenCreationRequest,
    payer: &Pubkey,
    fee_wallet: &Pubkey,
) -> Result<AssembledToken, MinterError>
where
    E: ChainEndpoint + ?Sized,
{
    let fee = ServiceFee::quote(&request.revoke);
    let base_units = request.base_units()?;

    let rent_lamports = endpoint
        .minimum_balance_for_rent_exemption(MINT_ACCOUNT_SPACE)
        .await?;

    let mint_keypair = Keypair::new();
    let mint_address = mint_keypair.address();
    let mint: Pubkey = mint_address
        .parse()
        .map_err(|_| MinterError::Codec(format!("invalid mint address: {}", mint_address)))?;

    let ctx = StepContext {
        payer: *payer,
        mint,
        associated_account: instructions::derive_associated_token_address(payer, &mint),
        fee_wallet: *fee_wallet,
        fee_lamports: fee.lamports(),
        rent_lamports,
        decimals: request.decimals,
        base_units,
        retain_freeze: !request.revoke.freeze,
    };

    let instructions: Vec<Instruction> = plan(&request.revoke)
        .into_iter()
        .map(|step| build_step(step, &ctx))
        .collect();

    let blockhash: Hash = endpoint.latest_blockhash().await?;
    let message = Message::new_with_blockhash(&instructions, Some(payer), &blockhash);
    let mut transaction = Transaction::new_unsigned(message);

    // The mint account must authorize its own creation; the wallet fills the
    // payer slot later.
    use solana_signer::Signer;
    let message_bytes = transaction.message.serialize();
    let signature = mint_keypair.sign_message(&message_bytes);
    transaction.add_signature(&mint_address, signature.as_ref())?;

    Ok(AssembledToken {
        transaction,
        mint_address,
        fee,
    })
}
