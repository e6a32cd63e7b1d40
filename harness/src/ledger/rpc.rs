use async_trait::async_trait;
use solana_client::{
    client_error::{ClientError, ClientErrorKind},
    nonblocking::rpc_client::RpcClient,
    rpc_config::{RpcSendTransactionConfig, RpcTransactionConfig},
    rpc_request::{RpcError, RpcResponseErrorData},
};
use solana_sdk::{
    commitment_config::CommitmentConfig,
    hash::Hash,
    signature::Signature,
    transaction::{Transaction, TransactionError},
};
use tracing::{debug, instrument, warn};

use super::{classify, failure_reason, Ledger};
use crate::{config::HarnessConfig, error::LedgerError, receipt::ConfirmationStatus};

/// Cluster reached over Solana JSON-RPC.
pub struct RpcLedger {
    client: RpcClient,
    commitment: CommitmentConfig,
    skip_preflight: bool,
}

impl RpcLedger {
    pub fn new(config: &HarnessConfig) -> Self {
        let client = RpcClient::new_with_timeout_and_commitment(
            config.cluster.url().to_string(),
            config.confirm_timeout,
            config.commitment,
        );

        Self {
            client,
            commitment: config.commitment,
            skip_preflight: config.skip_preflight,
        }
    }

    pub fn url(&self) -> String {
        self.client.url()
    }

    /// Log messages of a landed transaction; empty when the node cannot
    /// return them.
    async fn transaction_logs(&self, signature: &Signature) -> Vec<String> {
        let config = RpcTransactionConfig {
            commitment: Some(self.commitment),
            max_supported_transaction_version: Some(0),
            ..RpcTransactionConfig::default()
        };

        match self.client.get_transaction_with_config(signature, config).await {
            Ok(tx) => tx
                .transaction
                .meta
                .and_then(|meta| Option::<Vec<String>>::from(meta.log_messages))
                .unwrap_or_default(),
            Err(e) => {
                warn!(%signature, error = %e, "Could not fetch transaction logs");
                Vec::new()
            }
        }
    }
}

#[async_trait(?Send)]
impl Ledger for RpcLedger {
    #[instrument(skip(self))]
    async fn latest_blockhash(&self) -> Result<Hash, LedgerError> {
        self.client
            .get_latest_blockhash()
            .await
            .map_err(map_client_error)
    }

    #[instrument(skip_all)]
    async fn submit(&self, transaction: &Transaction) -> Result<Signature, LedgerError> {
        let config = RpcSendTransactionConfig {
            skip_preflight: self.skip_preflight,
            preflight_commitment: Some(self.commitment.commitment),
            ..RpcSendTransactionConfig::default()
        };

        self.client
            .send_transaction_with_config(transaction, config)
            .await
            .map_err(map_client_error)
    }

    #[instrument(skip(self))]
    async fn status(&self, signature: &Signature) -> Result<ConfirmationStatus, LedgerError> {
        let response = self
            .client
            .get_signature_statuses(&[*signature])
            .await
            .map_err(map_client_error)?;

        let Some(status) = response.value.into_iter().next().flatten() else {
            debug!(%signature, "Signature not yet visible");
            return Ok(ConfirmationStatus::Pending);
        };

        if let Some(err) = status.err.as_ref() {
            let logs = self.transaction_logs(signature).await;
            return Ok(landed_failure(err, &logs));
        }

        if status.satisfies_commitment(self.commitment) {
            Ok(ConfirmationStatus::Confirmed)
        } else {
            debug!(%signature, confirmation = ?status.confirmation_status, "Below commitment");
            Ok(ConfirmationStatus::Pending)
        }
    }
}

/// A transaction that landed with an error, classified from its logs.
fn landed_failure(err: &TransactionError, logs: &[String]) -> ConfirmationStatus {
    ConfirmationStatus::Failed(failure_reason(err, logs))
}

/// Map Solana client errors to ledger errors.
///
/// Preflight failures carry the simulated transaction error and logs; those
/// are classified like a landed transaction.
fn map_client_error(err: ClientError) -> LedgerError {
    if let Some(tx_err) = err.get_transaction_error() {
        return classify(&tx_err, &preflight_logs(&err));
    }

    match err.kind() {
        ClientErrorKind::Io(_) | ClientErrorKind::Reqwest(_) => {
            LedgerError::Unreachable(err.to_string())
        }
        _ => LedgerError::Refused(err.to_string()),
    }
}

fn preflight_logs(err: &ClientError) -> Vec<String> {
    match err.kind() {
        ClientErrorKind::RpcError(RpcError::RpcResponseError {
            data: RpcResponseErrorData::SendTransactionPreflightFailure(result),
            ..
        }) => result.logs.clone().unwrap_or_default(),
        _ => Vec::new(),
    }
}
