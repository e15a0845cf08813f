use anchor_lang::prelude::*;
use crate::errors::ErrorCode;

/// Binary gate over every mutating router operation except the toggle itself.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CircuitBreaker {
    pub paused: bool,
}

impl CircuitBreaker {
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn ensure_active(&self) -> Result<()> {
        require!(!self.paused, ErrorCode::Paused);
        Ok(())
    }

    /// Active -> Paused
    pub fn pause(&mut self) -> Result<()> {
        self.ensure_active()?;
        self.paused = true;
        Ok(())
    }

    /// Paused -> Active
    pub fn unpause(&mut self) -> Result<()> {
        require!(self.paused, ErrorCode::NotPaused);
        self.paused = false;
        Ok(())
    }
}
