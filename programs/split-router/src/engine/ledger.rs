use anchor_lang::prelude::*;

/// Offline authorization submitted alongside a permit distribution.
///
/// The nonce is not carried here: the ledger binds the signature to the
/// owner's current counter, which is what makes a consumed permit unusable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OfflineAuthorization {
    pub owner: Pubkey,
    pub spender: Pubkey,
    pub value: u64,
    pub expiry: i64,
    pub signature: [u8; 64],
}

/// Value ledger the router moves funds on.
///
/// Accounts are ledger accounts (token accounts on-chain); `authority_of`
/// names the principal that controls one.
pub trait Ledger {
    fn balance_of(&self, account: &Pubkey) -> Result<u64>;

    fn allowance(&self, owner: &Pubkey, spender: &Pubkey) -> Result<u64>;

    fn authority_of(&self, account: &Pubkey) -> Result<Pubkey>;

    /// Moves `amount` from `from` to `to`, spending `spender`'s allowance over `from`.
    fn move_value(&mut self, spender: &Pubkey, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()>;

    fn grant_allowance(&mut self, owner: &Pubkey, spender: &Pubkey, amount: u64) -> Result<()>;

    /// Verifies the authorization against the owner's current counter and the
    /// ledger's domain. On success advances the counter and grants `spender`
    /// an allowance of `value`; on failure changes nothing.
    fn consume_offline_authorization(&mut self, authorization: &OfflineAuthorization, now: i64) -> Result<()>;

    /// Runs `op` so that either all of its ledger effects persist or none do.
    fn atomically<T, F>(&mut self, op: F) -> Result<T>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<T>;
}
