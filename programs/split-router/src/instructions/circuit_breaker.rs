use anchor_lang::prelude::*;
use crate::constants::{ROLES_SEED, ROUTER_SEED};
use crate::events::{RouterPaused, RouterUnpaused};
use crate::states::{RoleRegistry, RouterConfig};

#[derive(Accounts)]
pub struct ToggleBreaker<'info> {
    /// Must hold the admin role
    pub admin: Signer<'info>,

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

impl<'info> ToggleBreaker<'info> {
    pub fn pause(ctx: Context<ToggleBreaker>) -> Result<()> {
        msg!("Pausing router {}", ctx.accounts.router_config.key());

        let admin = ctx.accounts.admin.key();
        ctx.accounts
            .router_config
            .pause(&**ctx.accounts.role_registry, &admin)?;

        let clock = Clock::get()?;
        emit!(RouterPaused {
            router: ctx.accounts.router_config.key(),
            paused_by: admin,
            timestamp: clock.unix_timestamp,
        });

        msg!("Router paused");
        Ok(())
    }

    pub fn unpause(ctx: Context<ToggleBreaker>) -> Result<()> {
        msg!("Unpausing router {}", ctx.accounts.router_config.key());

        let admin = ctx.accounts.admin.key();
        ctx.accounts
            .router_config
            .unpause(&**ctx.accounts.role_registry, &admin)?;

        let clock = Clock::get()?;
        emit!(RouterUnpaused {
            router: ctx.accounts.router_config.key(),
            unpaused_by: admin,
            timestamp: clock.unix_timestamp,
        });

        msg!("Router unpaused");
        Ok(())
    }
}
