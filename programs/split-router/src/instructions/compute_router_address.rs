use anchor_lang::prelude::*;
use crate::engine::{compute_router_address, InstanceArgs};

/// Read-only; takes no accounts besides the factory key it derives from.
#[derive(Accounts)]
pub struct ComputeRouterAddress<'info> {
    /// CHECK: only the key is used; the factory need not exist yet
    pub factory: UncheckedAccount<'info>,
}

impl<'info> ComputeRouterAddress<'info> {
    pub fn handle(ctx: Context<ComputeRouterAddress>, salt: [u8; 32], args: InstanceArgs) -> Result<Pubkey> {
        let (router, _) = compute_router_address(&ctx.accounts.factory.key(), &salt, &args);
        msg!("Router address for factory {}: {}", ctx.accounts.factory.key(), router);
        Ok(router)
    }
}
