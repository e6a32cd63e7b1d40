use solana_sdk::signature::Signature;

/// Confirmation status as reported by the ledger.
/// `Confirmed` and `Failed` are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationStatus {
    Pending,
    Confirmed,
    Failed(String),
}

impl ConfirmationStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ConfirmationStatus::Pending)
    }
}

/// Result of submitting one [`crate::OperationDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationReceipt {
    pub signature: Signature,
    pub status: ConfirmationStatus,
}

impl ConfirmationReceipt {
    pub(crate) fn confirmed(signature: Signature) -> Self {
        Self {
            signature,
            status: ConfirmationStatus::Confirmed,
        }
    }

    /// Base58 transaction signature
    pub fn id(&self) -> String {
        self.signature.to_string()
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == ConfirmationStatus::Confirmed
    }
}
