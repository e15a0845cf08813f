use anchor_lang::prelude::*;
use crate::errors::ErrorCode;

/// Per-owner permit counter. A permit signs the current value; consuming it
/// advances the counter, so each signature is usable once.
#[account]
#[derive(InitSpace, Default)]
pub struct PermitNonce {
    pub owner: Pubkey,
    pub nonce: u64,
    pub bump: u8,
}

impl PermitNonce {
    pub fn advance(&mut self) -> Result<()> {
        self.nonce = self.nonce.checked_add(1).ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }
}
