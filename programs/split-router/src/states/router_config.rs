use anchor_lang::prelude::*;
use crate::engine::address::{validate_treasury, validate_treasury_authority, InstanceArgs};
use crate::engine::breaker::CircuitBreaker;
use crate::engine::roles::{Role, RoleStore};
use crate::engine::split::{compute_split, validate_ratio_pair, SplitAmounts};

/// Split fractions and treasury of one router.
/// `fund_ratio_bps + burn_ratio_bps <= 10000` holds after every mutation.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RatioConfig {
    /// Treasury share in basis points
    pub fund_ratio_bps: u16,
    /// Sink share in basis points
    pub burn_ratio_bps: u16,
    /// Treasury token account
    pub treasury: Pubkey,
}

impl RatioConfig {
    pub fn new(fund_ratio_bps: u16, burn_ratio_bps: u16, treasury: Pubkey) -> Result<Self> {
        validate_ratio_pair(fund_ratio_bps, burn_ratio_bps)?;
        validate_treasury(&treasury)?;
        Ok(Self {
            fund_ratio_bps,
            burn_ratio_bps,
            treasury,
        })
    }

    pub fn set_fund_ratio(&mut self, fund_ratio_bps: u16) -> Result<()> {
        validate_ratio_pair(fund_ratio_bps, self.burn_ratio_bps)?;
        self.fund_ratio_bps = fund_ratio_bps;
        Ok(())
    }

    pub fn set_burn_ratio(&mut self, burn_ratio_bps: u16) -> Result<()> {
        validate_ratio_pair(self.fund_ratio_bps, burn_ratio_bps)?;
        self.burn_ratio_bps = burn_ratio_bps;
        Ok(())
    }

    pub fn set_treasury(&mut self, treasury: Pubkey) -> Result<()> {
        validate_treasury(&treasury)?;
        self.treasury = treasury;
        Ok(())
    }

    pub fn split(&self, amount: u64) -> Result<SplitAmounts> {
        compute_split(amount, self.fund_ratio_bps, self.burn_ratio_bps)
    }
}

/// Router instance placed by the factory.
/// Its PDA is also the delegate the router spends through on the ledger.
#[account]
#[derive(InitSpace, Default)]
pub struct RouterConfig {
    /// Factory that created this router
    pub factory: Pubkey,
    /// Salt consumed at creation
    pub salt: [u8; 32],
    /// Hash of the construction arguments (part of the PDA seeds)
    pub args_hash: [u8; 32],
    /// Split configuration
    pub ratios: RatioConfig,
    /// Pause gate
    pub breaker: CircuitBreaker,
    /// Set while a distribution is executing its legs
    pub locked: bool,
    /// Bump seed for the PDA
    pub bump: u8,
}

impl RouterConfig {
    /// Fills a freshly created router from its construction arguments
    pub fn initialize(&mut self, factory: Pubkey, salt: [u8; 32], args: &InstanceArgs, bump: u8) -> Result<()> {
        args.validate()?;
        self.factory = factory;
        self.salt = salt;
        self.args_hash = args.args_hash();
        self.ratios = RatioConfig::new(args.fund_ratio_bps, args.burn_ratio_bps, args.treasury)?;
        self.breaker = CircuitBreaker::default();
        self.locked = false;
        self.bump = bump;
        Ok(())
    }

    pub fn fund_ratio_bps(&self) -> u16 {
        self.ratios.fund_ratio_bps
    }

    pub fn burn_ratio_bps(&self) -> u16 {
        self.ratios.burn_ratio_bps
    }

    pub fn treasury_account(&self) -> Pubkey {
        self.ratios.treasury
    }

    pub fn is_paused(&self) -> bool {
        self.breaker.is_paused()
    }

    pub fn set_fund_ratio<R: RoleStore>(&mut self, roles: &R, caller: &Pubkey, fund_ratio_bps: u16) -> Result<()> {
        roles.ensure_role(caller, Role::RatioManager)?;
        self.breaker.ensure_active()?;
        self.ratios.set_fund_ratio(fund_ratio_bps)
    }

    pub fn set_burn_ratio<R: RoleStore>(&mut self, roles: &R, caller: &Pubkey, burn_ratio_bps: u16) -> Result<()> {
        roles.ensure_role(caller, Role::RatioManager)?;
        self.breaker.ensure_active()?;
        self.ratios.set_burn_ratio(burn_ratio_bps)
    }

    /// `treasury_authority` is the token authority of the new treasury account.
    pub fn set_treasury_account<R: RoleStore>(
        &mut self,
        roles: &R,
        caller: &Pubkey,
        treasury: Pubkey,
        treasury_authority: &Pubkey,
    ) -> Result<()> {
        roles.ensure_role(caller, Role::FundManager)?;
        self.breaker.ensure_active()?;
        validate_treasury_authority(treasury_authority)?;
        self.ratios.set_treasury(treasury)
    }

    pub fn pause<R: RoleStore>(&mut self, roles: &R, caller: &Pubkey) -> Result<()> {
        roles.ensure_role(caller, Role::Admin)?;
        self.breaker.pause()
    }

    pub fn unpause<R: RoleStore>(&mut self, roles: &R, caller: &Pubkey) -> Result<()> {
        roles.ensure_role(caller, Role::Admin)?;
        self.breaker.unpause()
    }
}
