use anchor_lang::prelude::*;
use crate::engine::SplitAmounts;
use crate::states::RouterConfig;

#[derive(Accounts)]
pub struct PreviewSplit<'info> {
    pub router_config: Account<'info, RouterConfig>,
}

impl<'info> PreviewSplit<'info> {
    pub fn handle(ctx: Context<PreviewSplit>, amount: u64) -> Result<SplitAmounts> {
        let split = ctx.accounts.router_config.ratios.split(amount)?;
        msg!(
            "Preview of {}: fund {}, burn {}, recipient {}",
            amount,
            split.fund_amount,
            split.burn_amount,
            split.recipient_amount
        );
        Ok(split)
    }
}
