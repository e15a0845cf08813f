use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_error::ProgramError;

/// Cap a consumed permit puts on what the router may move out of one owner
/// for the rest of the instruction. Moves from other owners are not capped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScopedAllowance {
    pub owner: Pubkey,
    pub remaining: u64,
}

impl ScopedAllowance {
    pub fn new(owner: Pubkey, amount: u64) -> Self {
        Self {
            owner,
            remaining: amount,
        }
    }

    /// Spendable amount given what the ledger itself has delegated.
    pub fn cap(&self, owner: &Pubkey, delegated: u64) -> u64 {
        if *owner == self.owner {
            delegated.min(self.remaining)
        } else {
            delegated
        }
    }

    pub fn spend(&mut self, from: &Pubkey, amount: u64) -> Result<()> {
        if *from != self.owner {
            return Ok(());
        }
        self.remaining = self
            .remaining
            .checked_sub(amount)
            .ok_or(ProgramError::InsufficientFunds)?;
        Ok(())
    }
}
