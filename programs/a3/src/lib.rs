use anchor_lang::prelude::*;

pub mod constants;
pub mod instructions;
pub mod state;

use instructions::*;

declare_id!("AW5Swy7B8vcL9HSNb3HcErMoKPgthb41FhLEWCZB4wqA");

#[program]
pub mod a3 {
    use super::*;

    /// One-time setup: creates the program state PDA.
    /// A second call fails because the PDA is already in use.
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize::handler(ctx)
    }
}
