use anchor_lang::prelude::*;
use anchor_lang::solana_program::sysvar::instructions as instructions_sysvar;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::constants::{PERMIT_NONCE_SEED, ROUTER_SEED, SINK_ACCOUNT};
use crate::engine::address::router_seeds;
use crate::engine::{DistributionEngine, PermitAccounts, SplLedger};
use crate::errors::ErrorCode;
use crate::states::{PermitNonce, RouterConfig};

#[derive(Accounts)]
pub struct DistributeWithAuthorization<'info> {
    /// Submitter; need not own the source (relayers are allowed)
    #[account(mut)]
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

    /// Debited account; its authority signed the permit
    #[account(mut, token::mint = mint)]
    pub source: Box<Account<'info, TokenAccount>>,

    /// Permit counter of the source
    #[account(
        init_if_needed,
        payer = sender,
        space = PermitNonce::DISCRIMINATOR.len() + PermitNonce::INIT_SPACE,
        seeds = [PERMIT_NONCE_SEED, source.key().as_ref()],
        bump
    )]
    pub permit_nonce: Account<'info, PermitNonce>,

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

    /// CHECK: instructions sysvar, holds the Ed25519 proof
    #[account(address = instructions_sysvar::ID)]
    pub instructions: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token>,

    pub system_program: Program<'info, System>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct AuthorizationParams {
    /// Amount to distribute; also the permitted value
    pub amount: u64,
    /// Unix timestamp after which the permit is void
    pub expiry: i64,
    /// Ed25519 signature of the source authority over the permit digest
    pub signature: [u8; 64],
}

impl<'info> DistributeWithAuthorization<'info> {
    pub fn handle(ctx: Context<DistributeWithAuthorization>, params: AuthorizationParams) -> Result<()> {
        msg!("Distributing {} tokens with offline authorization", params.amount);

        let clock = Clock::get()?;
        let router_key = ctx.accounts.router_config.key();
        let sender = ctx.accounts.sender.key();
        let source = ctx.accounts.source.key();
        let recipient = ctx.accounts.recipient.key();

        if ctx.accounts.permit_nonce.owner == Pubkey::default() {
            ctx.accounts.permit_nonce.owner = source;
            ctx.accounts.permit_nonce.bump = ctx.bumps.permit_nonce;
        }
        msg!("Permit nonce: {}", ctx.accounts.permit_nonce.nonce);

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
        .with_account(recipient, ctx.accounts.recipient.to_account_info())
        .with_permit(PermitAccounts {
            instructions: ctx.accounts.instructions.to_account_info(),
            nonce: &mut ctx.accounts.permit_nonce,
        });

        let event = DistributionEngine::new(router_key, &mut ctx.accounts.router_config)
            .distribute_with_authorization(
                &mut ledger,
                &sender,
                &source,
                &recipient,
                params.amount,
                params.expiry,
                params.signature,
                clock.unix_timestamp,
            )?;

        msg!("Treasury: {} tokens", event.fund_amount);
        msg!("Burned: {} tokens", event.burn_amount);
        msg!("Recipient: {} tokens", event.recipient_amount);
        emit!(event);

        msg!("Authorized distribution completed successfully!");
        Ok(())
    }
}
