use anchor_lang::prelude::*;

/// Event emitted when a factory identity is created
#[event]
pub struct FactoryInitialized {
    /// Factory PDA
    pub factory: Pubkey,
    /// Authority the factory PDA is derived from
    pub authority: Pubkey,
    /// Timestamp of initialization
    pub timestamp: i64,
}

/// Event emitted when the factory places a new router instance
#[event]
pub struct RouterCreated {
    /// Factory that placed the instance
    pub factory: Pubkey,
    /// Deterministic address of the new router
    pub router: Pubkey,
    /// Salt consumed by this creation
    pub salt: [u8; 32],
    /// Hash of the construction arguments
    pub args_hash: [u8; 32],
    /// Initial fund ratio in basis points
    pub fund_ratio_bps: u16,
    /// Initial burn ratio in basis points
    pub burn_ratio_bps: u16,
    /// Initial treasury token account
    pub treasury: Pubkey,
    /// Initial administrator (holds every role)
    pub admin: Pubkey,
    /// Timestamp of creation
    pub timestamp: i64,
}

/// Event emitted for every successful distribution.
/// `fund_amount + burn_amount + recipient_amount == total_amount` always holds.
#[event]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionExecuted {
    /// Router that executed the split
    pub router: Pubkey,
    /// Principal that submitted the distribution
    pub sender: Pubkey,
    /// Ledger account debited
    pub source: Pubkey,
    /// Ledger account receiving the remainder
    pub recipient: Pubkey,
    /// Total amount debited from the source
    pub total_amount: u64,
    /// Amount routed to the treasury
    pub fund_amount: u64,
    /// Amount routed to the sink
    pub burn_amount: u64,
    /// Amount credited to the recipient
    pub recipient_amount: u64,
    /// Timestamp of distribution
    pub timestamp: i64,
}

/// Event emitted when either split ratio changes
#[event]
pub struct RatioUpdated {
    pub router: Pubkey,
    pub previous_fund_ratio_bps: u16,
    pub previous_burn_ratio_bps: u16,
    pub fund_ratio_bps: u16,
    pub burn_ratio_bps: u16,
    pub updated_by: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when the treasury account changes
#[event]
pub struct TreasuryUpdated {
    pub router: Pubkey,
    pub previous_treasury: Pubkey,
    pub treasury: Pubkey,
    pub updated_by: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when a role is granted to a principal that did not hold it
#[event]
pub struct RoleGranted {
    pub router: Pubkey,
    /// Role discriminant (0 = admin, 1 = fund manager, 2 = ratio manager)
    pub role: u8,
    pub principal: Pubkey,
    pub granted_by: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when a role is revoked from a principal that held it
#[event]
pub struct RoleRevoked {
    pub router: Pubkey,
    /// Role discriminant (0 = admin, 1 = fund manager, 2 = ratio manager)
    pub role: u8,
    pub principal: Pubkey,
    pub revoked_by: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when the circuit breaker trips
#[event]
pub struct RouterPaused {
    pub router: Pubkey,
    pub paused_by: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when the circuit breaker resets
#[event]
pub struct RouterUnpaused {
    pub router: Pubkey,
    pub unpaused_by: Pubkey,
    pub timestamp: i64,
}
