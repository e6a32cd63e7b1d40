//! a1/a2 against the validator `anchor test` starts
//!
//! The provider comes from `ANCHOR_PROVIDER_URL` / `ANCHOR_WALLET`, and the
//! programs must already be deployed there.

use tzt_harness::{
    resolve_program, resolve_provider, ClientContext, ConfirmationStatus, HarnessConfig,
    InterfaceDescription, InvocationError, RpcLedger,
};

use crate::common::is_base58_id;

async fn initialize_twice(ctx: &ClientContext<RpcLedger>, name: &str) {
    let idl = InterfaceDescription::workspace(name).expect("Run 'anchor build' first");
    let program = resolve_program(ctx, &idl).unwrap();

    let receipt = program
        .method("initialize")
        .unwrap()
        .rpc(ctx)
        .await
        .expect("fresh target should confirm");
    assert_eq!(receipt.status, ConfirmationStatus::Confirmed);
    assert!(is_base58_id(&receipt.id()));
    println!("Your transaction signature {}", receipt.id());

    let again = program.method("initialize").unwrap().rpc(ctx).await;
    assert_eq!(
        again.unwrap_err(),
        InvocationError::Unconfirmed("already initialized".to_string())
    );
}

#[test_log::test(tokio::test)]
#[ignore = "requires a local validator started by `anchor test`"]
async fn test_a1_initialize_on_localnet() {
    let ctx = resolve_provider().expect("provider from environment");
    initialize_twice(&ctx, "a1").await;
}

/// The second call lands and fails on-chain instead of failing preflight
#[test_log::test(tokio::test)]
#[ignore = "requires a local validator started by `anchor test`"]
async fn test_a2_initialize_on_localnet_without_preflight() {
    let config = HarnessConfig {
        skip_preflight: true,
        ..HarnessConfig::from_env().expect("config from environment")
    };
    let ctx = ClientContext::from_config(config).expect("provider from environment");
    initialize_twice(&ctx, "a2").await;
}
