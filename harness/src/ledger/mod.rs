//! Ledger backends the invoker submits through.
//!
//! - `rpc` - a cluster reached over Solana JSON-RPC
//! - `svm` - an in-process LiteSVM instance

pub mod rpc;
pub mod svm;

use async_trait::async_trait;
use solana_sdk::{
    hash::Hash,
    instruction::InstructionError,
    signature::Signature,
    transaction::{Transaction, TransactionError},
};

use crate::{error::LedgerError, receipt::ConfirmationStatus};

/// Remote ledger as seen by the invoker.
///
/// Futures are not required to be `Send`: invocations run on a
/// single-threaded runtime and suspend only at these calls.
#[async_trait(?Send)]
pub trait Ledger {
    async fn latest_blockhash(&self) -> Result<Hash, LedgerError>;

    /// Send a signed transaction once. Returns its signature if the ledger
    /// accepted it for processing.
    async fn submit(&self, transaction: &Transaction) -> Result<Signature, LedgerError>;

    async fn status(&self, signature: &Signature) -> Result<ConfirmationStatus, LedgerError>;
}

/// Split a transaction error into "refused before execution" and
/// "failed during execution".
pub(crate) fn classify(err: &TransactionError, logs: &[String]) -> LedgerError {
    match err {
        TransactionError::InstructionError(..) => {
            LedgerError::ExecutionFailed(failure_reason(err, logs))
        }
        _ => LedgerError::Refused(rejection_reason(err)),
    }
}

pub(crate) fn rejection_reason(err: &TransactionError) -> String {
    match err {
        TransactionError::ProgramAccountNotFound | TransactionError::InvalidProgramForExecution => {
            "program not found".to_string()
        }
        other => other.to_string(),
    }
}

pub(crate) fn failure_reason(err: &TransactionError, logs: &[String]) -> String {
    let already_initialized = matches!(
        err,
        TransactionError::InstructionError(_, InstructionError::AccountAlreadyInitialized)
    ) || logs.iter().any(|line| line.contains("already in use"));

    if already_initialized {
        "already initialized".to_string()
    } else {
        err.to_string()
    }
}
