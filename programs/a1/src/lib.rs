use anchor_lang::prelude::*;

pub mod constants;
pub mod instructions;
pub mod state;

use instructions::*;

declare_id!("7WpuY6r6vwyfsmxbkhBxB7Nxzg7szk39qG8JJDP9mvFo");

#[program]
pub mod a1 {
    use super::*;

    /// One-time setup: creates the program state PDA.
    /// A second call fails because the PDA is already in use.
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize::handler(ctx)
    }
}
