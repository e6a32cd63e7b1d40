use std::{cell::RefCell, collections::HashMap};

use async_trait::async_trait;
use litesvm::LiteSVM;
use solana_sdk::{
    hash::Hash,
    signature::Signature,
    transaction::{Transaction, TransactionError},
};
use tracing::debug;

use super::{failure_reason, rejection_reason, Ledger};
use crate::{error::LedgerError, receipt::ConfirmationStatus};

/// In-process ledger backed by LiteSVM.
///
/// Transactions execute synchronously on submit, so a landed transaction is
/// immediately final. Instruction failures are recorded as landed-but-failed;
/// anything rejected before execution is a refusal.
pub struct SvmLedger {
    svm: RefCell<LiteSVM>,
    outcomes: RefCell<HashMap<Signature, ConfirmationStatus>>,
}

impl SvmLedger {
    pub fn new(svm: LiteSVM) -> Self {
        Self {
            svm: RefCell::new(svm),
            outcomes: RefCell::new(HashMap::new()),
        }
    }

    /// Direct access to the SVM for setup (airdrops, program loading) and
    /// post-state inspection.
    pub fn with_svm<R>(&self, f: impl FnOnce(&mut LiteSVM) -> R) -> R {
        f(&mut *self.svm.borrow_mut())
    }

    pub fn into_inner(self) -> LiteSVM {
        self.svm.into_inner()
    }
}

#[async_trait(?Send)]
impl Ledger for SvmLedger {
    /// Every call starts a new slot so an identical resubmission is a new
    /// transaction rather than a duplicate.
    async fn latest_blockhash(&self) -> Result<Hash, LedgerError> {
        let mut svm = self.svm.borrow_mut();
        svm.expire_blockhash();
        Ok(svm.latest_blockhash())
    }

    async fn submit(&self, transaction: &Transaction) -> Result<Signature, LedgerError> {
        let signature = transaction
            .signatures
            .first()
            .copied()
            .ok_or_else(|| LedgerError::Refused("transaction is not signed".to_string()))?;

        let result = self.svm.borrow_mut().send_transaction(transaction.clone());
        let status = match result {
            Ok(meta) => {
                debug!(%signature, compute_units = meta.compute_units_consumed, "Executed");
                ConfirmationStatus::Confirmed
            }
            Err(failed) => match &failed.err {
                TransactionError::InstructionError(..) => {
                    debug!(%signature, logs = ?failed.meta.logs, "Execution failed");
                    ConfirmationStatus::Failed(failure_reason(&failed.err, &failed.meta.logs))
                }
                other => return Err(LedgerError::Refused(rejection_reason(other))),
            },
        };

        self.outcomes.borrow_mut().insert(signature, status);
        Ok(signature)
    }

    async fn status(&self, signature: &Signature) -> Result<ConfirmationStatus, LedgerError> {
        Ok(self
            .outcomes
            .borrow()
            .get(signature)
            .cloned()
            .unwrap_or(ConfirmationStatus::Pending))
    }
}
