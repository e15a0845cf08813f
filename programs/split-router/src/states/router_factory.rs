use anchor_lang::prelude::*;
use crate::errors::ErrorCode;

/// Factory identity that places router instances at deterministic addresses
#[account]
#[derive(InitSpace, Default)]
pub struct RouterFactory {
    /// Authority the factory PDA is derived from
    pub authority: Pubkey,
    /// Number of routers placed so far
    pub instance_count: u64,
    /// Bump seed for the PDA
    pub bump: u8,
}

impl RouterFactory {
    pub fn record_instance(&mut self) -> Result<()> {
        self.instance_count = self
            .instance_count
            .checked_add(1)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }
}

/// Marks a salt as consumed by one factory.
/// A salt can place at most one router, whatever the construction arguments.
#[account]
#[derive(InitSpace, Default)]
pub struct SaltRecord {
    pub factory: Pubkey,
    pub salt: [u8; 32],
    /// Router placed with this salt
    pub router: Pubkey,
    pub used: bool,
    pub bump: u8,
}

impl SaltRecord {
    pub fn claim(&mut self, factory: Pubkey, salt: [u8; 32], router: Pubkey, bump: u8) -> Result<()> {
        require!(!self.used, ErrorCode::AddressOccupied);
        self.factory = factory;
        self.salt = salt;
        self.router = router;
        self.used = true;
        self.bump = bump;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salt_can_only_be_claimed_once() {
        let mut record = SaltRecord::default();
        record
            .claim(Pubkey::new_from_array([1; 32]), [7; 32], Pubkey::new_from_array([2; 32]), 250)
            .unwrap();

        let err = record
            .claim(Pubkey::new_from_array([1; 32]), [7; 32], Pubkey::new_from_array([3; 32]), 250)
            .unwrap_err();
        assert_eq!(err, ErrorCode::AddressOccupied.into());
        assert_eq!(record.router, Pubkey::new_from_array([2; 32]));
    }

    #[test]
    fn counts_instances() {
        let mut factory = RouterFactory::default();
        factory.record_instance().unwrap();
        factory.record_instance().unwrap();
        assert_eq!(factory.instance_count, 2);

        factory.instance_count = u64::MAX;
        assert_eq!(factory.record_instance().unwrap_err(), ErrorCode::MathOverflow.into());
    }
}
