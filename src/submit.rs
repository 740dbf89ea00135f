//! Transaction submission and confirmation.

use crate::error::MinterError;
use crate::network::ChainEndpoint;
use crate::transaction::{Transaction, TransactionExt};

/// Send a signed transaction and wait for "confirmed" commitment.
///
/// A confirmation that carries an error is a failure even though the cluster
/// accepted the submission. Nothing here retries: the blockhash binds the
/// transaction to a short validity window, so a retry means reassembling with
/// a fresh one.
pub async fn submit_and_confirm<E>(
    endpoint: &E,
    transaction: &Transaction,
) -> Result<String, MinterError>
where
    E: ChainEndpoint + ?Sized,
{
    let tx_bytes = transaction.to_bytes()?;
    let signature = endpoint.send_transaction(&tx_bytes).await?;
    let status = endpoint.confirm_transaction(&signature).await?;

    if let Some(reason) = status.err {
        return Err(MinterError::TransactionFailed { signature, reason });
    }

    Ok(signature)
}
