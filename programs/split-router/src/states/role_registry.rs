use anchor_lang::prelude::*;
use crate::constants::MAX_ROLE_MEMBERS;
use crate::engine::roles::{Role, RoleStore};
use crate::errors::ErrorCode;

/// A principal together with the bitmask of roles it holds
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoleMember {
    pub principal: Pubkey,
    pub roles: u8,
}

/// Per-router permission membership
#[account]
#[derive(InitSpace, Default)]
pub struct RoleRegistry {
    /// Router these roles govern
    pub router: Pubkey,
    /// Principals holding at least one role. Bound must equal `MAX_ROLE_MEMBERS`.
    #[max_len(16)]
    pub members: Vec<RoleMember>,
    /// Bump seed for the PDA
    pub bump: u8,
}

impl RoleRegistry {
    /// Seeds the initial administrator with every role
    pub fn seed_admin(&mut self, router: Pubkey, admin: Pubkey, bump: u8) {
        self.router = router;
        self.members = vec![RoleMember {
            principal: admin,
            roles: Role::all_mask(),
        }];
        self.bump = bump;
    }

    fn position(&self, principal: &Pubkey) -> Option<usize> {
        self.members.iter().position(|m| m.principal == *principal)
    }
}

impl RoleStore for RoleRegistry {
    fn has_role(&self, principal: &Pubkey, role: Role) -> bool {
        self.position(principal)
            .map(|i| self.members[i].roles & role.mask() != 0)
            .unwrap_or(false)
    }

    fn grant(&mut self, role: Role, principal: &Pubkey) -> Result<bool> {
        match self.position(principal) {
            Some(i) => {
                let member = &mut self.members[i];
                let added = member.roles & role.mask() == 0;
                member.roles |= role.mask();
                Ok(added)
            }
            None => {
                require!(self.members.len() < MAX_ROLE_MEMBERS, ErrorCode::RoleRegistryFull);
                self.members.push(RoleMember {
                    principal: *principal,
                    roles: role.mask(),
                });
                Ok(true)
            }
        }
    }

    fn revoke(&mut self, role: Role, principal: &Pubkey) -> Result<bool> {
        let Some(i) = self.position(principal) else {
            return Ok(false);
        };
        let member = &mut self.members[i];
        let removed = member.roles & role.mask() != 0;
        member.roles &= !role.mask();
        if member.roles == 0 {
            self.members.swap_remove(i);
        }
        Ok(removed)
    }
}
