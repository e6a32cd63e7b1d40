//! Program handles resolved from an interface description.

use std::{collections::HashMap, str::FromStr};

use anchor_lang::{prelude::System, AnchorSerialize, Id};
use solana_sdk::{instruction::AccountMeta, pubkey::Pubkey, signature::Keypair};

use crate::{
    context::ClientContext,
    descriptor::OperationDescriptor,
    error::{InterfaceError, InvocationError},
    idl::{IdlAccount, IdlInstruction, IdlSeed, InterfaceDescription},
    invoker::invoke,
    ledger::Ledger,
    receipt::ConfirmationReceipt,
};

/// Typed handle on a deployed program; the only surface for building
/// descriptors against it.
#[derive(Debug, Clone)]
pub struct ProgramHandle {
    program_id: Pubkey,
    name: String,
    payer: Pubkey,
    idl: InterfaceDescription,
}

/// Resolve a program handle for `idl`, binding signer defaults to the
/// context's wallet.
pub fn resolve_program<L: Ledger>(
    ctx: &ClientContext<L>,
    idl: &InterfaceDescription,
) -> Result<ProgramHandle, InterfaceError> {
    let address = idl.program_address().ok_or(InterfaceError::MissingAddress)?;
    let program_id = parse_pubkey(address)?;

    Ok(ProgramHandle {
        program_id,
        name: idl.name().to_string(),
        payer: ctx.payer_pubkey(),
        idl: idl.clone(),
    })
}

impl ProgramHandle {
    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start building a call to `name`.
    pub fn method(&self, name: &str) -> Result<MethodBuilder<'_>, InterfaceError> {
        let instruction =
            self.idl
                .instruction(name)
                .ok_or_else(|| InterfaceError::UnknownInstruction {
                    program: self.name.clone(),
                    name: name.to_string(),
                })?;

        Ok(MethodBuilder {
            handle: self,
            instruction,
            data: instruction.discriminator(),
            accounts: HashMap::new(),
            remaining: Vec::new(),
            signers: Vec::new(),
            error: None,
        })
    }
}

/// Builder for one [`OperationDescriptor`].
///
/// Account resolution order per IDL account: explicit `account(..)`, fixed
/// address, PDA derivation, well-known program names, then the wallet for
/// signer accounts.
pub struct MethodBuilder<'h> {
    handle: &'h ProgramHandle,
    instruction: &'h IdlInstruction,
    data: Vec<u8>,
    accounts: HashMap<String, Pubkey>,
    remaining: Vec<AccountMeta>,
    signers: Vec<Keypair>,
    error: Option<InterfaceError>,
}

impl<'h> MethodBuilder<'h> {
    /// Append the next argument in IDL order.
    pub fn arg<T: AnchorSerialize>(mut self, value: &T) -> Self {
        if self.error.is_none() {
            if let Err(e) = value.serialize(&mut self.data) {
                self.error = Some(InterfaceError::Encode(e.to_string()));
            }
        }
        self
    }

    pub fn account(mut self, name: &str, pubkey: Pubkey) -> Self {
        self.accounts.insert(name.to_string(), pubkey);
        self
    }

    pub fn remaining_accounts(mut self, metas: impl IntoIterator<Item = AccountMeta>) -> Self {
        self.remaining.extend(metas);
        self
    }

    pub fn signer(mut self, signer: Keypair) -> Self {
        self.signers.push(signer);
        self
    }

    pub fn build(mut self) -> Result<OperationDescriptor, InterfaceError> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }

        let instruction = self.instruction;
        let mut resolved: HashMap<&str, Pubkey> = HashMap::new();
        let mut metas = Vec::with_capacity(instruction.accounts.len() + self.remaining.len());

        for account in &instruction.accounts {
            let Some(pubkey) = self.resolve(account, &resolved)? else {
                // Anchor encodes an omitted optional account as the program id
                metas.push(AccountMeta::new_readonly(self.handle.program_id, false));
                continue;
            };
            resolved.insert(account.name.as_str(), pubkey);
            metas.push(if account.writable {
                AccountMeta::new(pubkey, account.signer)
            } else {
                AccountMeta::new_readonly(pubkey, account.signer)
            });
        }
        metas.extend(self.remaining);

        let descriptor = self
            .signers
            .into_iter()
            .fold(
                OperationDescriptor::new(
                    self.handle.program_id,
                    instruction.name.clone(),
                    self.data,
                    metas,
                ),
                OperationDescriptor::with_signer,
            );
        Ok(descriptor)
    }

    /// Build and invoke with the context's default deadline.
    pub async fn rpc<L: Ledger>(
        self,
        ctx: &ClientContext<L>,
    ) -> Result<ConfirmationReceipt, InvocationError> {
        let descriptor = self.build()?;
        invoke(ctx, &descriptor).await
    }

    fn resolve(
        &self,
        account: &IdlAccount,
        resolved: &HashMap<&str, Pubkey>,
    ) -> Result<Option<Pubkey>, InterfaceError> {
        if let Some(pubkey) = self.accounts.get(&account.name) {
            return Ok(Some(*pubkey));
        }
        if let Some(address) = &account.address {
            return parse_pubkey(address).map(Some);
        }
        if let Some(pda) = &account.pda {
            if let Some(pubkey) = self.derive_pda(&pda.seeds, pda.program.as_ref(), resolved)? {
                return Ok(Some(pubkey));
            }
        }
        if let Some(pubkey) = well_known_program(&account.name) {
            return Ok(Some(pubkey));
        }
        if account.signer {
            return Ok(Some(self.handle.payer));
        }
        if account.optional {
            return Ok(None);
        }
        Err(InterfaceError::UnresolvedAccount(account.name.clone()))
    }

    /// `None` when a seed depends on an argument or an account not yet known.
    fn derive_pda(
        &self,
        seeds: &[IdlSeed],
        program: Option<&IdlSeed>,
        resolved: &HashMap<&str, Pubkey>,
    ) -> Result<Option<Pubkey>, InterfaceError> {
        let mut bytes: Vec<Vec<u8>> = Vec::with_capacity(seeds.len());
        for seed in seeds {
            match self.seed_bytes(seed, resolved) {
                Some(b) => bytes.push(b),
                None => return Ok(None),
            }
        }

        let owner = match program {
            None => self.handle.program_id,
            Some(seed) => match self.seed_bytes(seed, resolved) {
                Some(b) => Pubkey::try_from(b.as_slice())
                    .map_err(|_| InterfaceError::InvalidAddress(format!("{b:?}")))?,
                None => return Ok(None),
            },
        };

        let slices: Vec<&[u8]> = bytes.iter().map(Vec::as_slice).collect();
        Ok(Some(Pubkey::find_program_address(&slices, &owner).0))
    }

    fn seed_bytes(&self, seed: &IdlSeed, resolved: &HashMap<&str, Pubkey>) -> Option<Vec<u8>> {
        match seed {
            IdlSeed::Const { value } => Some(value.clone()),
            IdlSeed::Account { path } => resolved
                .get(path.as_str())
                .or_else(|| self.accounts.get(path))
                .map(|pk| pk.to_bytes().to_vec()),
            IdlSeed::Arg { .. } => None,
        }
    }
}

/// Legacy IDLs omit fixed addresses; Anchor clients fill these by name.
fn well_known_program(name: &str) -> Option<Pubkey> {
    match name {
        "systemProgram" | "system_program" => Some(System::id()),
        _ => None,
    }
}

fn parse_pubkey(s: &str) -> Result<Pubkey, InterfaceError> {
    Pubkey::from_str(s).map_err(|_| InterfaceError::InvalidAddress(s.to_string()))
}
