use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::constants::{ROUTER_SEED, SINK_ACCOUNT};
use crate::engine::address::router_seeds;
use crate::engine::{DistributionEngine, SplLedger};
use crate::errors::ErrorCode;
use crate::states::RouterConfig;

#[derive(Accounts)]
pub struct Distribute<'info> {
    /// Authority of the source token account
    pub sender: Signer<'info>,

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

    pub mint: Box<Account<'info, Mint>>,

    /// Debited account; must have delegated to the router PDA
    #[account(mut, token::mint = mint)]
    pub source: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        address = router_config.ratios.treasury @ ErrorCode::InvalidTreasury,
        token::mint = mint,
        constraint = treasury.owner != SINK_ACCOUNT @ ErrorCode::InvalidTreasury
    )]
    pub treasury: Box<Account<'info, TokenAccount>>,

    /// Token account held by the incinerator
    #[account(
        mut,
        token::mint = mint,
        constraint = sink.owner == SINK_ACCOUNT @ ErrorCode::InvalidRecipient
    )]
    pub sink: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = mint,
        constraint = recipient.owner != SINK_ACCOUNT @ ErrorCode::InvalidRecipient
    )]
    pub recipient: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
}

impl<'info> Distribute<'info> {
    pub fn handle(ctx: Context<Distribute>, amount: u64) -> Result<()> {
        msg!("Distributing {} tokens", amount);

        let clock = Clock::get()?;
        let router_key = ctx.accounts.router_config.key();
        let sender = ctx.accounts.sender.key();
        let source = ctx.accounts.source.key();
        let recipient = ctx.accounts.recipient.key();

        let factory = ctx.accounts.router_config.factory;
        let salt = ctx.accounts.router_config.salt;
        let args_hash = ctx.accounts.router_config.args_hash;
        let bump = [ctx.accounts.router_config.bump];
        let [tag, factory_seed, salt_seed, args_hash_seed] = router_seeds(&factory, &salt, &args_hash);
        let signer_seeds: &[&[&[u8]]] = &[&[tag, factory_seed, salt_seed, args_hash_seed, &bump]];

        let mut ledger = SplLedger::new(
            ctx.accounts.token_program.to_account_info(),
            ctx.accounts.mint.to_account_info(),
            ctx.accounts.mint.decimals,
            ctx.accounts.router_config.to_account_info(),
            signer_seeds,
        )
        .with_account(source, ctx.accounts.source.to_account_info())
        .with_account(ctx.accounts.treasury.key(), ctx.accounts.treasury.to_account_info())
        .with_account(SINK_ACCOUNT, ctx.accounts.sink.to_account_info())
        .with_account(recipient, ctx.accounts.recipient.to_account_info());

        let event = DistributionEngine::new(router_key, &mut ctx.accounts.router_config).distribute(
            &mut ledger,
            &sender,
            &source,
            &recipient,
            amount,
            clock.unix_timestamp,
        )?;

        msg!("Treasury: {} tokens", event.fund_amount);
        msg!("Burned: {} tokens", event.burn_amount);
        msg!("Recipient: {} tokens", event.recipient_amount);
        emit!(event);

        msg!("Distribution completed successfully!");
        Ok(())
    }
}
