use anchor_lang::prelude::*;
use crate::constants::FACTORY_SEED;
use crate::events::FactoryInitialized;
use crate::states::RouterFactory;

#[derive(Accounts)]
pub struct InitializeFactory<'info> {
    /// Authority the factory is derived from
    #[account(mut)]
    pub authority: Signer<'info>,

    /// Factory PDA
    #[account(
        init,
        payer = authority,
        space = RouterFactory::DISCRIMINATOR.len() + RouterFactory::INIT_SPACE,
        seeds = [FACTORY_SEED, authority.key().as_ref()],
        bump
    )]
    pub factory: Account<'info, RouterFactory>,

    pub system_program: Program<'info, System>,
}

impl<'info> InitializeFactory<'info> {
    pub fn handle(ctx: Context<InitializeFactory>) -> Result<()> {
        msg!("Initializing router factory");

        let factory_key = ctx.accounts.factory.key();
        let authority = ctx.accounts.authority.key();
        let factory = &mut ctx.accounts.factory;
        factory.authority = authority;
        factory.instance_count = 0;
        factory.bump = ctx.bumps.factory;

        let clock = Clock::get()?;
        emit!(FactoryInitialized {
            factory: factory_key,
            authority,
            timestamp: clock.unix_timestamp,
        });

        msg!("Factory {} initialized for {}", factory_key, authority);
        Ok(())
    }
}
