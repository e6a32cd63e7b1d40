/// PDA seed for the program state account
pub const STATE_SEED: &[u8] = b"state";
