use anchor_lang::prelude::*;
use crate::constants::{BPS_DENOMINATOR, MAX_COMBINED_RATIO_BPS};
use crate::errors::ErrorCode;

/// Three-way split of a distributed amount.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SplitAmounts {
    /// Amount routed to the treasury
    pub fund_amount: u64,
    /// Amount routed to the sink
    pub burn_amount: u64,
    /// Remainder credited to the recipient
    pub recipient_amount: u64,
}

impl SplitAmounts {
    pub fn total(&self) -> Option<u64> {
        self.fund_amount
            .checked_add(self.burn_amount)?
            .checked_add(self.recipient_amount)
    }
}

/// Rejects a ratio pair whose combined share exceeds 100%.
pub fn validate_ratio_pair(fund_ratio_bps: u16, burn_ratio_bps: u16) -> Result<()> {
    let combined = u32::from(fund_ratio_bps) + u32::from(burn_ratio_bps);
    require!(
        combined <= u32::from(MAX_COMBINED_RATIO_BPS),
        ErrorCode::RatioInvariantViolation
    );
    Ok(())
}

/// Splits `amount` into treasury, sink and recipient legs.
///
/// Both ratio legs are floored; the recipient leg is computed by subtraction so
/// the rounding remainder always lands on the recipient and the three legs sum
/// to `amount` exactly.
pub fn compute_split(amount: u64, fund_ratio_bps: u16, burn_ratio_bps: u16) -> Result<SplitAmounts> {
    validate_ratio_pair(fund_ratio_bps, burn_ratio_bps)?;

    let fund_amount = portion_of(amount, fund_ratio_bps)?;
    let burn_amount = portion_of(amount, burn_ratio_bps)?;
    let recipient_amount = amount
        .checked_sub(fund_amount)
        .and_then(|rest| rest.checked_sub(burn_amount))
        .ok_or(ErrorCode::MathOverflow)?;

    Ok(SplitAmounts {
        fund_amount,
        burn_amount,
        recipient_amount,
    })
}

fn portion_of(amount: u64, ratio_bps: u16) -> Result<u64> {
    let scaled = u128::from(amount)
        .checked_mul(u128::from(ratio_bps))
        .ok_or(ErrorCode::MathOverflow)?
        / u128::from(BPS_DENOMINATOR);
    u64::try_from(scaled).map_err(|_| error!(ErrorCode::MathOverflow))
}
