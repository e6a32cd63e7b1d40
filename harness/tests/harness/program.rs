//! IDL-driven program handles

use anchor_lang::{InstructionData, ToAccountMetas};
use solana_sdk::{instruction::AccountMeta, pubkey::Pubkey, signature::Keypair, signer::Signer};
use solana_system_interface::program as system_program;
use tzt_harness::{resolve_program, InterfaceDescription, InterfaceError, OperationDescriptor};

use crate::common::{fixture_idl, scripted_context, Behavior};

const A1_ADDRESS: &str = "7WpuY6r6vwyfsmxbkhBxB7Nxzg7szk39qG8JJDP9mvFo";

#[test]
fn test_resolves_program_address_from_idl() {
    let ctx = scripted_context(Behavior::NeverConfirm);
    let program = resolve_program(&ctx, &fixture_idl("a1")).unwrap();

    assert_eq!(program.name(), "a1");
    assert_eq!(program.program_id().to_string(), A1_ADDRESS);
    assert_eq!(*program.program_id(), a1::ID);
}

/// The IDL path must produce the same instruction as Anchor's generated client types
#[test]
fn test_initialize_matches_generated_client_types() {
    let ctx = scripted_context(Behavior::NeverConfirm);
    let program = resolve_program(&ctx, &fixture_idl("a1")).unwrap();

    let from_idl = program.method("initialize").unwrap().build().unwrap();

    let (state, _bump) = Pubkey::find_program_address(&[a1::constants::STATE_SEED], &a1::ID);
    let generated = OperationDescriptor::anchor(
        a1::ID,
        "initialize",
        a1::instruction::Initialize {},
        a1::accounts::Initialize {
            payer: ctx.payer_pubkey(),
            state,
            system_program: system_program::ID,
        },
    );

    assert_eq!(from_idl.procedure(), "initialize");
    assert_eq!(from_idl.instruction(), generated.instruction());
    assert_eq!(from_idl.data(), a1::instruction::Initialize {}.data().as_slice());
    assert!(from_idl.signers().is_empty());
}

/// Pre-0.30 IDLs: top-level name, `isMut`/`isSigner`, string seeds, no
/// system program address
#[test]
fn test_legacy_idl_builds_same_instruction() {
    let ctx = scripted_context(Behavior::NeverConfirm);
    let legacy = resolve_program(&ctx, &fixture_idl("a1_legacy")).unwrap();
    let current = resolve_program(&ctx, &fixture_idl("a1")).unwrap();

    assert_eq!(legacy.name(), "a1");
    assert_eq!(legacy.program_id(), current.program_id());

    let from_legacy = legacy.method("initialize").unwrap().build().unwrap();
    let from_current = current.method("initialize").unwrap().build().unwrap();
    assert_eq!(from_legacy.instruction(), from_current.instruction());
    assert_eq!(from_legacy.accounts()[2].pubkey, system_program::ID);
}

#[test]
fn test_unknown_method() {
    let ctx = scripted_context(Behavior::NeverConfirm);
    let program = resolve_program(&ctx, &fixture_idl("a1")).unwrap();

    let err = program.method("close").err().unwrap();
    assert!(
        matches!(err, InterfaceError::UnknownInstruction { ref name, .. } if name == "close"),
        "{err:?}"
    );
}

#[test]
fn test_missing_address_is_reported() {
    let ctx = scripted_context(Behavior::NeverConfirm);
    let idl =
        InterfaceDescription::from_json(r#"{ "metadata": { "name": "x" }, "instructions": [] }"#)
            .unwrap();

    let err = resolve_program(&ctx, &idl).unwrap_err();
    assert!(matches!(err, InterfaceError::MissingAddress));
}

const TRANSFER_IDL: &str = r#"{
    "address": "7WpuY6r6vwyfsmxbkhBxB7Nxzg7szk39qG8JJDP9mvFo",
    "metadata": { "name": "vault" },
    "instructions": [{
        "name": "deposit",
        "accounts": [
            { "name": "owner", "writable": true, "signer": true },
            { "name": "recipient", "writable": true },
            {
                "name": "vault",
                "writable": true,
                "pda": { "seeds": [
                    { "kind": "const", "value": [118, 97, 117, 108, 116] },
                    { "kind": "account", "path": "recipient" }
                ] }
            },
            { "name": "memo", "optional": true }
        ],
        "args": [{ "name": "amount", "type": "u64" }]
    }]
}"#;

#[test]
fn test_unresolved_account_requires_explicit_pubkey() {
    let ctx = scripted_context(Behavior::NeverConfirm);
    let idl = InterfaceDescription::from_json(TRANSFER_IDL).unwrap();
    let program = resolve_program(&ctx, &idl).unwrap();

    let err = program.method("deposit").unwrap().build().unwrap_err();
    assert!(matches!(err, InterfaceError::UnresolvedAccount(ref name) if name == "recipient"));
}

#[test]
fn test_accounts_args_and_account_seeded_pda() {
    let ctx = scripted_context(Behavior::NeverConfirm);
    let idl = InterfaceDescription::from_json(TRANSFER_IDL).unwrap();
    let program = resolve_program(&ctx, &idl).unwrap();
    let recipient = Pubkey::new_unique();
    let cosigner = Keypair::new();

    let descriptor = program
        .method("deposit")
        .unwrap()
        .arg(&42u64)
        .account("recipient", recipient)
        .remaining_accounts([AccountMeta::new_readonly(cosigner.pubkey(), true)])
        .signer(cosigner)
        .build()
        .unwrap();

    // No discriminator in the IDL: derived from the instruction name
    let mut expected_data = tzt_harness::idl::sighash("global", "deposit").to_vec();
    expected_data.extend_from_slice(&42u64.to_le_bytes());
    assert_eq!(descriptor.data(), expected_data.as_slice());

    let (vault, _) =
        Pubkey::find_program_address(&[b"vault", recipient.as_ref()], program.program_id());
    let accounts = descriptor.accounts();
    assert_eq!(accounts.len(), 5);
    assert_eq!(accounts[0], AccountMeta::new(ctx.payer_pubkey(), true));
    assert_eq!(accounts[1], AccountMeta::new(recipient, false));
    assert_eq!(accounts[2], AccountMeta::new(vault, false));
    // Omitted optional account is passed as the program id
    assert_eq!(accounts[3], AccountMeta::new_readonly(*program.program_id(), false));
    assert!(accounts[4].is_signer);
    assert_eq!(descriptor.signers().len(), 1);
}

#[test]
fn test_generated_account_metas_mark_payer_as_signer() {
    let payer = Pubkey::new_unique();
    let metas = a2::accounts::Initialize {
        payer,
        state: Pubkey::new_unique(),
        system_program: system_program::ID,
    }
    .to_account_metas(None);

    assert_eq!(metas[0], AccountMeta::new(payer, true));
    assert!(metas[1].is_writable && !metas[1].is_signer);
    assert!(!metas[2].is_writable);
}
