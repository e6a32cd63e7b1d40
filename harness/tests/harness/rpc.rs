//! JSON-RPC backend with no cluster listening

use solana_sdk::{pubkey::Pubkey, signature::Keypair};
use tzt_harness::{invoke, Cluster, ClientContext, InvocationError, OperationDescriptor, RpcLedger};

use crate::common::fast_config;

#[test_log::test(tokio::test)]
async fn test_unreachable_cluster_is_connection_error() {
    let config = tzt_harness::HarnessConfig {
        // Nothing listens on port 1
        cluster: Cluster::Custom("http://127.0.0.1:1".to_string()),
        ..fast_config()
    };
    let ctx = ClientContext::new(RpcLedger::new(&config), Keypair::new(), config);
    let descriptor = OperationDescriptor::new(Pubkey::new_unique(), "initialize", vec![], vec![]);

    let err = invoke(&ctx, &descriptor).await.unwrap_err();

    assert_eq!(err, InvocationError::Rejected("connection error".to_string()));
}

#[tokio::test]
async fn test_provider_from_config_reads_wallet() {
    let dir = tempfile::tempdir().unwrap();
    let wallet_path = dir.path().join("id.json");
    let wallet = Keypair::new();
    solana_sdk::signature::write_keypair_file(&wallet, &wallet_path).unwrap();

    let config = tzt_harness::HarnessConfig {
        wallet: wallet_path,
        ..fast_config()
    };
    let ctx = ClientContext::from_config(config).unwrap();

    assert_eq!(ctx.payer_pubkey(), solana_sdk::signer::Signer::pubkey(&wallet));
    assert_eq!(ctx.ledger().url(), "http://127.0.0.1:8899");
}

#[tokio::test]
async fn test_provider_with_missing_wallet_fails() {
    let config = tzt_harness::HarnessConfig {
        wallet: "/nonexistent/id.json".into(),
        ..fast_config()
    };

    let err = ClientContext::from_config(config).err().expect("wallet is missing");
    assert!(matches!(err, tzt_harness::ConfigError::Wallet { .. }), "{err:?}");
}
