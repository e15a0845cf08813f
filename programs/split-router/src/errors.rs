use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Transfer amount must be greater than zero")]
    InvalidAmount,
    #[msg("Recipient must be a real account (not null, not the sink)")]
    InvalidRecipient,
    #[msg("Fund ratio plus burn ratio would exceed 10000 bps")]
    RatioInvariantViolation,
    #[msg("Caller lacks the permission required for this operation")]
    Unauthorized,
    #[msg("Router is paused")]
    Paused,
    #[msg("Router is not paused")]
    NotPaused,
    #[msg("Offline authorization has expired")]
    AuthorizationExpired,
    #[msg("Offline authorization signature or nonce does not match")]
    AuthorizationInvalid,
    #[msg("Ledger rejected one of the distribution legs")]
    LedgerMoveFailed,
    #[msg("Treasury account must be set and must not be the sink")]
    InvalidTreasury,
    #[msg("Initial administrator must be set")]
    InvalidAdmin,
    #[msg("Distribution already in progress")]
    ReentrantCall,
    #[msg("Salt already used by this factory")]
    AddressOccupied,
    #[msg("Role registry is full")]
    RoleRegistryFull,
    #[msg("Math overflow occurred during calculation")]
    MathOverflow,
}
