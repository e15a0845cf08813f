use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash::hashv;
use crate::constants::{FACTORY_SEED, INSTANCE_CODE_TAG, ROUTER_SEED, SINK_ACCOUNT};
use crate::engine::split::validate_ratio_pair;
use crate::errors::ErrorCode;

/// Construction arguments of a router instance.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstanceArgs {
    /// Treasury share in basis points
    pub fund_ratio_bps: u16,
    /// Sink share in basis points
    pub burn_ratio_bps: u16,
    /// Treasury token account
    pub treasury: Pubkey,
    /// Initial administrator, seeded with every role
    pub admin: Pubkey,
}

impl InstanceArgs {
    pub fn validate(&self) -> Result<()> {
        validate_ratio_pair(self.fund_ratio_bps, self.burn_ratio_bps)?;
        validate_treasury(&self.treasury)?;
        require_keys_neq!(self.admin, Pubkey::default(), ErrorCode::InvalidAdmin);
        Ok(())
    }

    /// Hash of the instance code tag followed by the encoded arguments.
    pub fn args_hash(&self) -> [u8; 32] {
        hashv(&[
            INSTANCE_CODE_TAG,
            &self.fund_ratio_bps.to_le_bytes(),
            &self.burn_ratio_bps.to_le_bytes(),
            self.treasury.as_ref(),
            self.admin.as_ref(),
        ])
        .to_bytes()
    }
}

pub fn validate_treasury(treasury: &Pubkey) -> Result<()> {
    require_keys_neq!(*treasury, Pubkey::default(), ErrorCode::InvalidTreasury);
    require_keys_neq!(*treasury, SINK_ACCOUNT, ErrorCode::InvalidTreasury);
    Ok(())
}

/// Token authority of the treasury account. An account the incinerator holds
/// would turn the treasury leg into a second burn.
pub fn validate_treasury_authority(authority: &Pubkey) -> Result<()> {
    require_keys_neq!(*authority, SINK_ACCOUNT, ErrorCode::InvalidTreasury);
    Ok(())
}

pub fn compute_factory_address(authority: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[FACTORY_SEED, authority.as_ref()], &crate::ID)
}

/// Address a router created by `factory` with `salt` and `args` occupies.
/// Pure: the same inputs always give the same address, before or after creation.
pub fn compute_router_address(factory: &Pubkey, salt: &[u8; 32], args: &InstanceArgs) -> (Pubkey, u8) {
    let args_hash = args.args_hash();
    Pubkey::find_program_address(&router_seeds(factory, salt, &args_hash), &crate::ID)
}

/// Seed order of a router PDA. The `seeds = [...]` constraints on router
/// accounts list the same four parts in this order.
pub fn router_seeds<'a>(factory: &'a Pubkey, salt: &'a [u8; 32], args_hash: &'a [u8; 32]) -> [&'a [u8]; 4] {
    [ROUTER_SEED, factory.as_ref(), salt.as_ref(), args_hash.as_ref()]
}
