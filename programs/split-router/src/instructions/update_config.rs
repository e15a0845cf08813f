use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;
use crate::constants::{ROLES_SEED, ROUTER_SEED};
use crate::events::{RatioUpdated, TreasuryUpdated};
use crate::states::{RoleRegistry, RouterConfig};

#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    /// Holder of the role the update requires
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [
            ROUTER_SEED,
            router_config.factory.as_ref(),
            router_config.salt.as_ref(),
            router_config.args_hash.as_ref()
        ],
        bump = router_config.bump
    )]
    pub router_config: Box<Account<'info, RouterConfig>>,

    #[account(
        seeds = [ROLES_SEED, router_config.key().as_ref()],
        bump = role_registry.bump
    )]
    pub role_registry: Box<Account<'info, RoleRegistry>>,
}

impl<'info> UpdateConfig<'info> {
    pub fn set_fund_ratio(ctx: Context<UpdateConfig>, fund_ratio_bps: u16) -> Result<()> {
        msg!("Setting fund ratio to {} bps", fund_ratio_bps);

        let authority = ctx.accounts.authority.key();
        let previous = ctx.accounts.router_config.ratios;
        ctx.accounts
            .router_config
            .set_fund_ratio(&**ctx.accounts.role_registry, &authority, fund_ratio_bps)?;

        ctx.accounts.emit_ratio_updated(previous.fund_ratio_bps, previous.burn_ratio_bps, authority)
    }

    pub fn set_burn_ratio(ctx: Context<UpdateConfig>, burn_ratio_bps: u16) -> Result<()> {
        msg!("Setting burn ratio to {} bps", burn_ratio_bps);

        let authority = ctx.accounts.authority.key();
        let previous = ctx.accounts.router_config.ratios;
        ctx.accounts
            .router_config
            .set_burn_ratio(&**ctx.accounts.role_registry, &authority, burn_ratio_bps)?;

        ctx.accounts.emit_ratio_updated(previous.fund_ratio_bps, previous.burn_ratio_bps, authority)
    }

    fn emit_ratio_updated(&self, previous_fund_ratio_bps: u16, previous_burn_ratio_bps: u16, updated_by: Pubkey) -> Result<()> {
        let clock = Clock::get()?;
        emit!(RatioUpdated {
            router: self.router_config.key(),
            previous_fund_ratio_bps,
            previous_burn_ratio_bps,
            fund_ratio_bps: self.router_config.fund_ratio_bps(),
            burn_ratio_bps: self.router_config.burn_ratio_bps(),
            updated_by,
            timestamp: clock.unix_timestamp,
        });

        msg!(
            "Ratios updated: fund {} bps, burn {} bps",
            self.router_config.fund_ratio_bps(),
            self.router_config.burn_ratio_bps()
        );
        Ok(())
    }
}

#[derive(Accounts)]
pub struct UpdateTreasury<'info> {
    /// Must hold the fund manager role
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [
            ROUTER_SEED,
            router_config.factory.as_ref(),
            router_config.salt.as_ref(),
            router_config.args_hash.as_ref()
        ],
        bump = router_config.bump
    )]
    pub router_config: Box<Account<'info, RouterConfig>>,

    #[account(
        seeds = [ROLES_SEED, router_config.key().as_ref()],
        bump = role_registry.bump
    )]
    pub role_registry: Box<Account<'info, RoleRegistry>>,

    /// New treasury token account
    pub treasury: Box<Account<'info, TokenAccount>>,
}

impl<'info> UpdateTreasury<'info> {
    pub fn handle(ctx: Context<UpdateTreasury>) -> Result<()> {
        let treasury = ctx.accounts.treasury.key();
        msg!("Setting treasury account to {}", treasury);

        let authority = ctx.accounts.authority.key();
        let treasury_authority = ctx.accounts.treasury.owner;
        let previous_treasury = ctx.accounts.router_config.treasury_account();
        ctx.accounts.router_config.set_treasury_account(
            &**ctx.accounts.role_registry,
            &authority,
            treasury,
            &treasury_authority,
        )?;

        let clock = Clock::get()?;
        emit!(TreasuryUpdated {
            router: ctx.accounts.router_config.key(),
            previous_treasury,
            treasury,
            updated_by: authority,
            timestamp: clock.unix_timestamp,
        });

        msg!("Treasury account updated");
        Ok(())
    }
}
