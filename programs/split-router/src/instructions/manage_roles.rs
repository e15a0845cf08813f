use anchor_lang::prelude::*;
use crate::constants::{ROLES_SEED, ROUTER_SEED};
use crate::engine::roles::{grant_role, revoke_role};
use crate::engine::Role;
use crate::events::{RoleGranted, RoleRevoked};
use crate::states::{RoleRegistry, RouterConfig};

/// Role administration. Not gated by the circuit breaker.
#[derive(Accounts)]
pub struct ManageRoles<'info> {
    /// Must hold the admin role
    pub admin: Signer<'info>,

    #[account(
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
        mut,
        seeds = [ROLES_SEED, router_config.key().as_ref()],
        bump = role_registry.bump
    )]
    pub role_registry: Box<Account<'info, RoleRegistry>>,
}

impl<'info> ManageRoles<'info> {
    pub fn grant(ctx: Context<ManageRoles>, role: Role, principal: Pubkey) -> Result<()> {
        msg!("Granting {:?} to {}", role, principal);

        let admin = ctx.accounts.admin.key();
        let added = grant_role(&mut **ctx.accounts.role_registry, &admin, role, &principal)?;
        if !added {
            msg!("{} already holds {:?}", principal, role);
            return Ok(());
        }

        let clock = Clock::get()?;
        emit!(RoleGranted {
            router: ctx.accounts.router_config.key(),
            role: role as u8,
            principal,
            granted_by: admin,
            timestamp: clock.unix_timestamp,
        });

        msg!("Role granted");
        Ok(())
    }

    pub fn revoke(ctx: Context<ManageRoles>, role: Role, principal: Pubkey) -> Result<()> {
        msg!("Revoking {:?} from {}", role, principal);

        let admin = ctx.accounts.admin.key();
        let removed = revoke_role(&mut **ctx.accounts.role_registry, &admin, role, &principal)?;
        if !removed {
            msg!("{} does not hold {:?}", principal, role);
            return Ok(());
        }

        let clock = Clock::get()?;
        emit!(RoleRevoked {
            router: ctx.accounts.router_config.key(),
            role: role as u8,
            principal,
            revoked_by: admin,
            timestamp: clock.unix_timestamp,
        });

        msg!("Role revoked");
        Ok(())
    }
}
