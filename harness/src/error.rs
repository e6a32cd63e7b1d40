use solana_sdk::signature::Signature;
use thiserror::Error;

/// Outcome of a single invocation that did not confirm.
///
/// Every variant is scoped to one call; nothing here is process-fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvocationError {
    /// Refused before any state change. Not retryable without correcting the request.
    #[error("rejected: {0}")]
    Rejected(String),

    /// Accepted by the network, but execution reported failure.
    #[error("unconfirmed: {0}")]
    Unconfirmed(String),

    /// No terminal status before the deadline. The operation may still land,
    /// so callers should re-query `signature` instead of resubmitting.
    #[error("timed out waiting for confirmation")]
    Timeout { signature: Option<Signature> },
}

impl InvocationError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, InvocationError::Timeout { .. })
    }
}

/// Failure reported by a [`crate::Ledger`] backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("ledger unreachable: {0}")]
    Unreachable(String),

    #[error("transaction refused: {0}")]
    Refused(String),

    #[error("transaction failed: {0}")]
    ExecutionFailed(String),
}

impl From<LedgerError> for InvocationError {
    fn from(e: LedgerError) -> Self {
        match e {
            LedgerError::Unreachable(_) => {
                InvocationError::Rejected("connection error".to_string())
            }
            LedgerError::Refused(reason) => InvocationError::Rejected(reason),
            LedgerError::ExecutionFailed(reason) => InvocationError::Unconfirmed(reason),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("failed to read wallet {path}: {reason}")]
    Wallet { path: String, reason: String },
}

#[derive(Error, Debug)]
pub enum InterfaceError {
    #[error("failed to read interface description {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed interface description: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("interface description has no program address")]
    MissingAddress,

    #[error("invalid address {0:?}")]
    InvalidAddress(String),

    #[error("program {program} has no instruction named {name}")]
    UnknownInstruction { program: String, name: String },

    #[error("account `{0}` could not be resolved; pass it explicitly")]
    UnresolvedAccount(String),

    #[error("failed to encode argument: {0}")]
    Encode(String),
}

impl From<InterfaceError> for InvocationError {
    fn from(e: InterfaceError) -> Self {
        InvocationError::Rejected(e.to_string())
    }
}
