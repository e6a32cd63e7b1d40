use anchor_lang::prelude::*;

use crate::constants::STATE_SEED;
use crate::state::ProgramState;

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    /// Program state PDA
    #[account(
        init,
        payer = payer,
        space = ProgramState::SIZE,
        seeds = [STATE_SEED],
        bump
    )]
    pub state: Account<'info, ProgramState>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Initialize>) -> Result<()> {
    msg!("Greetings from: {:?}", ctx.program_id);

    let state = &mut ctx.accounts.state;
    state.authority = ctx.accounts.payer.key();
    state.bump = ctx.bumps.state;

    Ok(())
}
