use solana_sdk::{
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair},
    signer::Signer,
};
use tracing::info;

use crate::{
    config::HarnessConfig,
    error::ConfigError,
    ledger::{rpc::RpcLedger, Ledger},
};

/// Ledger connection, signing identity and settings for one test run.
///
/// Built once and passed by reference into every call.
pub struct ClientContext<L: Ledger = RpcLedger> {
    ledger: L,
    payer: Keypair,
    config: HarnessConfig,
}

impl<L: Ledger> ClientContext<L> {
    pub fn new(ledger: L, payer: Keypair, config: HarnessConfig) -> Self {
        Self {
            ledger,
            payer,
            config,
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn payer(&self) -> &Keypair {
        &self.payer
    }

    pub fn payer_pubkey(&self) -> Pubkey {
        self.payer.pubkey()
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }
}

impl ClientContext<RpcLedger> {
    /// Connect to the configured cluster with the configured wallet.
    pub fn from_config(config: HarnessConfig) -> Result<Self, ConfigError> {
        let payer = read_keypair_file(&config.wallet).map_err(|e| ConfigError::Wallet {
            path: config.wallet.display().to_string(),
            reason: e.to_string(),
        })?;
        let ledger = RpcLedger::new(&config);

        info!(
            cluster = %config.cluster.url(),
            wallet = %payer.pubkey(),
            commitment = ?config.commitment.commitment,
            "Resolved provider"
        );

        Ok(Self::new(ledger, payer, config))
    }
}

/// Resolve the provider from `ANCHOR_PROVIDER_URL`, `ANCHOR_WALLET` and the
/// harness settings in the environment.
pub fn resolve_provider() -> Result<ClientContext<RpcLedger>, ConfigError> {
    ClientContext::from_config(HarnessConfig::from_env()?)
}
