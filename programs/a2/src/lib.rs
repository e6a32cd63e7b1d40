use anchor_lang::prelude::*;

pub mod constants;
pub mod instructions;
pub mod state;

use instructions::*;

declare_id!("3s8r3yo4zxrPDG88E1TurPC5EiPzphnbF9Dvv6kBRhAL");

#[program]
pub mod a2 {
    use super::*;

    /// One-time setup: creates the program state PDA.
    /// A second call fails because the PDA is already in use.
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize::handler(ctx)
    }
}
