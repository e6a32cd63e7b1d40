use anchor_lang::prelude::*;

/// Program state account
/// PDA seeds: [b"state"]
#[account]
pub struct ProgramState {
    /// Signer that paid for and ran `initialize`
    pub authority: Pubkey,

    /// PDA bump seed
    pub bump: u8,
}

impl ProgramState {
    /// Account discriminator (8) + authority (32) + bump (1)
    pub const SIZE: usize = 8 + 32 + 1; // 41 bytes
}
