use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;
use crate::constants::{FACTORY_SEED, ROLES_SEED, ROUTER_SEED, SALT_SEED};
use crate::engine::address::validate_treasury_authority;
use crate::engine::InstanceArgs;
use crate::errors::ErrorCode;
use crate::events::RouterCreated;
use crate::states::{RoleRegistry, RouterConfig, RouterFactory, SaltRecord};

#[derive(Accounts)]
#[instruction(salt: [u8; 32], args: InstanceArgs)]
pub struct CreateRouter<'info> {
    /// Factory authority, pays for the new accounts
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [FACTORY_SEED, authority.key().as_ref()],
        bump = factory.bump,
        has_one = authority
    )]
    pub factory: Box<Account<'info, RouterFactory>>,

    /// Used-salt marker; checked before the router address is touched
    #[account(
        init_if_needed,
        payer = authority,
        space = SaltRecord::DISCRIMINATOR.len() + SaltRecord::INIT_SPACE,
        seeds = [SALT_SEED, factory.key().as_ref(), salt.as_ref()],
        bump,
        constraint = !salt_record.used @ ErrorCode::AddressOccupied
    )]
    pub salt_record: Box<Account<'info, SaltRecord>>,

    /// Initial treasury token account
    #[account(address = args.treasury @ ErrorCode::InvalidTreasury)]
    pub treasury: Box<Account<'info, TokenAccount>>,

    /// Router instance at its deterministic address; seeds in `router_seeds` order
    #[account(
        init,
        payer = authority,
        space = RouterConfig::DISCRIMINATOR.len() + RouterConfig::INIT_SPACE,
        seeds = [ROUTER_SEED, factory.key().as_ref(), salt.as_ref(), args.args_hash().as_ref()],
        bump
    )]
    pub router_config: Box<Account<'info, RouterConfig>>,

    /// Role membership of the new router
    #[account(
        init,
        payer = authority,
        space = RoleRegistry::DISCRIMINATOR.len() + RoleRegistry::INIT_SPACE,
        seeds = [ROLES_SEED, router_config.key().as_ref()],
        bump
    )]
    pub role_registry: Box<Account<'info, RoleRegistry>>,

    pub system_program: Program<'info, System>,
}

impl<'info> CreateRouter<'info> {
    pub fn handle(ctx: Context<CreateRouter>, salt: [u8; 32], args: InstanceArgs) -> Result<()> {
        msg!("Creating router");
        msg!(
            "Fund ratio: {} bps, burn ratio: {} bps, treasury: {}",
            args.fund_ratio_bps,
            args.burn_ratio_bps,
            args.treasury
        );

        args.validate()?;
        validate_treasury_authority(&ctx.accounts.treasury.owner)?;

        let factory_key = ctx.accounts.factory.key();
        let router_key = ctx.accounts.router_config.key();

        ctx.accounts
            .salt_record
            .claim(factory_key, salt, router_key, ctx.bumps.salt_record)?;
        ctx.accounts
            .router_config
            .initialize(factory_key, salt, &args, ctx.bumps.router_config)?;
        ctx.accounts
            .role_registry
            .seed_admin(router_key, args.admin, ctx.bumps.role_registry);
        ctx.accounts.factory.record_instance()?;

        let clock = Clock::get()?;
        emit!(RouterCreated {
            factory: factory_key,
            router: router_key,
            salt,
            args_hash: ctx.accounts.router_config.args_hash,
            fund_ratio_bps: args.fund_ratio_bps,
            burn_ratio_bps: args.burn_ratio_bps,
            treasury: args.treasury,
            admin: args.admin,
            timestamp: clock.unix_timestamp,
        });

        msg!(
            "Router {} created (instance #{})",
            router_key,
            ctx.accounts.factory.instance_count
        );
        Ok(())
    }
}
