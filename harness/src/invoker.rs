//! Confirmation-driven invocation: submit once, then wait for a terminal status.

use std::time::Duration;

use solana_sdk::{hash::Hash, signer::Signer, transaction::Transaction};
use tokio::time::{sleep_until, timeout_at, Instant};
use tracing::{debug, info, instrument, warn};

use crate::{
    context::ClientContext,
    descriptor::OperationDescriptor,
    error::InvocationError,
    ledger::Ledger,
    receipt::{ConfirmationReceipt, ConfirmationStatus},
};

/// Invoke with the context's configured confirmation timeout.
pub async fn invoke<L: Ledger>(
    ctx: &ClientContext<L>,
    descriptor: &OperationDescriptor,
) -> Result<ConfirmationReceipt, InvocationError> {
    invoke_with_deadline(ctx, descriptor, ctx.config().confirm_timeout).await
}

/// Submit `descriptor` exactly once and wait until the ledger reports it
/// confirmed or failed.
///
/// `deadline` bounds the whole call, submission included. There are no
/// retries: a [`InvocationError::Timeout`] after submission means the
/// outcome is unknown, and the returned signature should be re-queried
/// rather than the descriptor resubmitted.
#[instrument(
    skip_all,
    fields(program = %descriptor.program_id(), procedure = descriptor.procedure())
)]
pub async fn invoke_with_deadline<L: Ledger>(
    ctx: &ClientContext<L>,
    descriptor: &OperationDescriptor,
    deadline: Duration,
) -> Result<ConfirmationReceipt, InvocationError> {
    let deadline = Instant::now() + deadline;
    let ledger = ctx.ledger();

    let blockhash = timeout_at(deadline, ledger.latest_blockhash())
        .await
        .map_err(|_| InvocationError::Timeout { signature: None })??;

    let transaction = sign_transaction(ctx, descriptor, blockhash)?;
    let signature = transaction.signatures[0];

    timeout_at(deadline, ledger.submit(&transaction))
        .await
        .map_err(|_| InvocationError::Timeout {
            signature: Some(signature),
        })??;
    debug!(%signature, "Submitted, awaiting confirmation");

    let poll_interval = ctx.config().poll_interval;
    loop {
        match timeout_at(deadline, ledger.status(&signature)).await {
            Ok(Ok(ConfirmationStatus::Confirmed)) => {
                info!(%signature, "Your transaction signature");
                return Ok(ConfirmationReceipt::confirmed(signature));
            }
            Ok(Ok(ConfirmationStatus::Failed(reason))) => {
                warn!(%signature, %reason, "Transaction failed after acceptance");
                return Err(InvocationError::Unconfirmed(reason));
            }
            Ok(Ok(ConfirmationStatus::Pending)) => {
                debug!(%signature, "Transaction not yet confirmed");
            }
            Ok(Err(e)) => {
                warn!(%signature, error = %e, "Error checking transaction status");
            }
            Err(_) => break,
        }

        if Instant::now() >= deadline {
            break;
        }
        sleep_until((Instant::now() + poll_interval).min(deadline)).await;
    }

    warn!(%signature, "Transaction not confirmed before deadline");
    Err(InvocationError::Timeout {
        signature: Some(signature),
    })
}

fn sign_transaction<L: Ledger>(
    ctx: &ClientContext<L>,
    descriptor: &OperationDescriptor,
    blockhash: Hash,
) -> Result<Transaction, InvocationError> {
    let payer = ctx.payer();

    let mut signers: Vec<&dyn Signer> = Vec::with_capacity(1 + descriptor.signers().len());
    signers.push(payer);
    signers.extend(descriptor.signers().iter().map(|k| k as &dyn Signer));

    let mut transaction =
        Transaction::new_with_payer(&[descriptor.instruction()], Some(&payer.pubkey()));
    transaction
        .try_sign(&signers, blockhash)
        .map_err(|e| InvocationError::Rejected(format!("signing failed: {e}")))?;

    Ok(transaction)
}
