//! Operation descriptors: one fully specified call against an on-chain program.

use anchor_lang::{InstructionData, ToAccountMetas};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    signature::Keypair,
};

/// A remote procedure call against a program: target, procedure name,
/// encoded arguments, touched accounts, and any signers besides the payer.
///
/// Immutable once built. The payer held by the [`crate::ClientContext`]
/// always signs and pays; `signers` only lists the additional ones.
pub struct OperationDescriptor {
    program_id: Pubkey,
    procedure: String,
    data: Vec<u8>,
    accounts: Vec<AccountMeta>,
    signers: Vec<Keypair>,
}

impl OperationDescriptor {
    pub fn new(
        program_id: Pubkey,
        procedure: impl Into<String>,
        data: Vec<u8>,
        accounts: Vec<AccountMeta>,
    ) -> Self {
        Self {
            program_id,
            procedure: procedure.into(),
            data,
            accounts,
            signers: Vec::new(),
        }
    }

    /// Build from Anchor's generated `instruction::*` and `accounts::*` types.
    pub fn anchor<I, A>(
        program_id: Pubkey,
        procedure: impl Into<String>,
        args: I,
        accounts: A,
    ) -> Self
    where
        I: InstructionData,
        A: ToAccountMetas,
    {
        Self::new(program_id, procedure, args.data(), accounts.to_account_metas(None))
    }

    /// Wrap an already-built instruction.
    pub fn from_instruction(procedure: impl Into<String>, instruction: Instruction) -> Self {
        Self::new(
            instruction.program_id,
            procedure,
            instruction.data,
            instruction.accounts,
        )
    }

    pub fn with_signer(mut self, signer: Keypair) -> Self {
        self.signers.push(signer);
        self
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn procedure(&self) -> &str {
        &self.procedure
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn accounts(&self) -> &[AccountMeta] {
        &self.accounts
    }

    pub fn signers(&self) -> &[Keypair] {
        &self.signers
    }

    pub fn instruction(&self) -> Instruction {
        Instruction {
            program_id: self.program_id,
            accounts: self.accounts.clone(),
            data: self.data.clone(),
        }
    }
}

impl std::fmt::Debug for OperationDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationDescriptor")
            .field("program_id", &self.program_id)
            .field("procedure", &self.procedure)
            .field("data_len", &self.data.len())
            .field("accounts", &self.accounts)
            .field("signers", &self.signers.len())
            .finish()
    }
}
