use anchor_lang::prelude::*;
use crate::errors::ErrorCode;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Pause/unpause, grant/revoke every role
    Admin,
    /// Change the treasury account
    FundManager,
    /// Change the fund and burn ratios
    RatioManager,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::FundManager, Role::RatioManager];

    pub fn mask(self) -> u8 {
        1 << (self as u8)
    }

    pub fn all_mask() -> u8 {
        Self::ALL.iter().fold(0, |acc, role| acc | role.mask())
    }
}

/// Principal -> permission membership.
pub trait RoleStore {
    fn has_role(&self, principal: &Pubkey, role: Role) -> bool;

    /// Returns `true` if the principal did not hold the role before.
    fn grant(&mut self, role: Role, principal: &Pubkey) -> Result<bool>;

    /// Returns `true` if the principal held the role before.
    fn revoke(&mut self, role: Role, principal: &Pubkey) -> Result<bool>;

    fn ensure_role(&self, principal: &Pubkey, role: Role) -> Result<()> {
        require!(self.has_role(principal, role), ErrorCode::Unauthorized);
        Ok(())
    }
}

/// Admin-gated grant.
pub fn grant_role<R: RoleStore>(roles: &mut R, caller: &Pubkey, role: Role, principal: &Pubkey) -> Result<bool> {
    roles.ensure_role(caller, Role::Admin)?;
    roles.grant(role, principal)
}

/// Admin-gated revoke.
pub fn revoke_role<R: RoleStore>(roles: &mut R, caller: &Pubkey, role: Role, principal: &Pubkey) -> Result<bool> {
    roles.ensure_role(caller, Role::Admin)?;
    roles.revoke(role, principal)
}
