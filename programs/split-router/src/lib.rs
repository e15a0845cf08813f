use anchor_lang::prelude::*;

declare_id!("HKmoS9SAgGAyTj1NH3nh44NnQtHfRudSpWfrqDishzko");

pub mod instructions;
pub mod engine;
pub mod errors;
pub mod constants;
pub mod states;
pub mod events;

pub use instructions::*;
pub use events::*;
pub use engine::{InstanceArgs, Role, SplitAmounts};

#[program]
pub mod split_router {
    use super::*;

    pub fn initialize_factory(ctx: Context<InitializeFactory>) -> Result<()> {
        InitializeFactory::handle(ctx)
    }

    pub fn create_router(ctx: Context<CreateRouter>, salt: [u8; 32], args: InstanceArgs) -> Result<()> {
        CreateRouter::handle(ctx, salt, args)
    }

    pub fn compute_router_address(
        ctx: Context<ComputeRouterAddress>,
        salt: [u8; 32],
        args: InstanceArgs
    ) -> Result<Pubkey> {
        ComputeRouterAddress::handle(ctx, salt, args)
    }

    pub fn distribute(ctx: Context<Distribute>, amount: u64) -> Result<()> {
        Distribute::handle(ctx, amount)
    }

    pub fn distribute_with_authorization(
        ctx: Context<DistributeWithAuthorization>,
        params: AuthorizationParams
    ) -> Result<()> {
        DistributeWithAuthorization::handle(ctx, params)
    }

    pub fn set_fund_ratio(ctx: Context<UpdateConfig>, fund_ratio_bps: u16) -> Result<()> {
        UpdateConfig::set_fund_ratio(ctx, fund_ratio_bps)
    }

    pub fn set_burn_ratio(ctx: Context<UpdateConfig>, burn_ratio_bps: u16) -> Result<()> {
        UpdateConfig::set_burn_ratio(ctx, burn_ratio_bps)
    }

    pub fn set_treasury_account(ctx: Context<UpdateTreasury>) -> Result<()> {
        UpdateTreasury::handle(ctx)
    }

    pub fn grant_role(ctx: Context<ManageRoles>, role: Role, principal: Pubkey) -> Result<()> {
        ManageRoles::grant(ctx, role, principal)
    }

    pub fn revoke_role(ctx: Context<ManageRoles>, role: Role, principal: Pubkey) -> Result<()> {
        ManageRoles::revoke(ctx, role, principal)
    }

    pub fn pause(ctx: Context<ToggleBreaker>) -> Result<()> {
        ToggleBreaker::pause(ctx)
    }

    pub fn unpause(ctx: Context<ToggleBreaker>) -> Result<()> {
        ToggleBreaker::unpause(ctx)
    }

    pub fn preview_split(ctx: Context<PreviewSplit>, amount: u64) -> Result<SplitAmounts> {
        PreviewSplit::handle(ctx, amount)
    }
}
