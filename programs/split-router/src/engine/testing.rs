//! In-memory ledger used by the engine tests.

use std::collections::{BTreeMap, BTreeSet};

use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_error::ProgramError;
use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};

use crate::engine::ledger::{Ledger, OfflineAuthorization};
use crate::engine::permit::{domain_separator, PermitMessage};
use crate::errors::ErrorCode;

pub fn signing_key(seed: u8) -> SigningKey {
    SigningKey::from_bytes(&[seed; 32])
}

pub fn principal_of(key: &SigningKey) -> Pubkey {
    Pubkey::new_from_array(key.verifying_key().to_bytes())
}

#[derive(Clone, Debug, Default)]
pub struct MemoryLedger {
    pub domain: Pubkey,
    pub balances: BTreeMap<Pubkey, u64>,
    pub allowances: BTreeMap<(Pubkey, Pubkey), u64>,
    pub authorities: BTreeMap<Pubkey, Pubkey>,
    pub nonces: BTreeMap<Pubkey, u64>,
    pub rejected_destinations: BTreeSet<Pubkey>,
    pub moves: Vec<(Pubkey, Pubkey, u64)>,
}

impl MemoryLedger {
    pub fn new(domain: Pubkey) -> Self {
        Self {
            domain,
            ..Default::default()
        }
    }

    pub fn open_account(&mut self, account: Pubkey, authority: Pubkey, balance: u64) {
        self.authorities.insert(account, authority);
        self.balances.insert(account, balance);
    }

    pub fn approve(&mut self, owner: Pubkey, spender: Pubkey, amount: u64) {
        self.allowances.insert((owner, spender), amount);
    }

    /// Makes every credit to `account` fail, like a frozen token account.
    pub fn reject_credits_to(&mut self, account: Pubkey) {
        self.rejected_destinations.insert(account);
    }

    pub fn nonce_of(&self, owner: &Pubkey) -> u64 {
        self.nonces.get(owner).copied().unwrap_or(0)
    }

    /// Signs a permit the way an owner's wallet would.
    pub fn sign_permit(
        &self,
        key: &SigningKey,
        owner: Pubkey,
        spender: Pubkey,
        value: u64,
        expiry: i64,
    ) -> [u8; 64] {
        let message = PermitMessage {
            owner,
            spender,
            value,
            nonce: self.nonce_of(&owner),
            expiry,
        };
        let digest = message.digest(&domain_separator(&crate::ID, &self.domain));
        key.sign(&digest).to_bytes()
    }
}

impl Ledger for MemoryLedger {
    fn balance_of(&self, account: &Pubkey) -> Result<u64> {
        Ok(self.balances.get(account).copied().unwrap_or(0))
    }

    fn allowance(&self, owner: &Pubkey, spender: &Pubkey) -> Result<u64> {
        Ok(self.allowances.get(&(*owner, *spender)).copied().unwrap_or(0))
    }

    fn authority_of(&self, account: &Pubkey) -> Result<Pubkey> {
        self.authorities
            .get(account)
            .copied()
            .ok_or_else(|| ProgramError::UninitializedAccount.into())
    }

    fn move_value(&mut self, spender: &Pubkey, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()> {
        if self.rejected_destinations.contains(to) {
            return Err(ProgramError::InvalidAccountData.into());
        }
        let allowance = self.allowance(from, spender)?;
        let balance = self.balance_of(from)?;
        if allowance < amount || balance < amount {
            return Err(ProgramError::InsufficientFunds.into());
        }

        self.allowances.insert((*from, *spender), allowance - amount);
        self.balances.insert(*from, balance - amount);
        let credited = self
            .balance_of(to)?
            .checked_add(amount)
            .ok_or(ProgramError::ArithmeticOverflow)?;
        self.balances.insert(*to, credited);
        self.moves.push((*from, *to, amount));
        Ok(())
    }

    fn grant_allowance(&mut self, owner: &Pubkey, spender: &Pubkey, amount: u64) -> Result<()> {
        self.approve(*owner, *spender, amount);
        Ok(())
    }

    fn consume_offline_authorization(&mut self, authorization: &OfflineAuthorization, now: i64) -> Result<()> {
        require!(now <= authorization.expiry, ErrorCode::AuthorizationExpired);

        let signer = self
            .authority_of(&authorization.owner)
            .map_err(|_| error!(ErrorCode::AuthorizationInvalid))?;
        let message = PermitMessage {
            owner: authorization.owner,
            spender: authorization.spender,
            value: authorization.value,
            nonce: self.nonce_of(&authorization.owner),
            expiry: authorization.expiry,
        };
        let digest = message.digest(&domain_separator(&crate::ID, &self.domain));

        let key = VerifyingKey::from_bytes(&signer.to_bytes())
            .map_err(|_| error!(ErrorCode::AuthorizationInvalid))?;
        key.verify_strict(&digest, &Signature::from_bytes(&authorization.signature))
            .map_err(|_| error!(ErrorCode::AuthorizationInvalid))?;

        let next = message.nonce.checked_add(1).ok_or(ErrorCode::MathOverflow)?;
        self.nonces.insert(authorization.owner, next);
        self.grant_allowance(&authorization.owner, &authorization.spender, authorization.value)
    }

    fn atomically<T, F>(&mut self, op: F) -> Result<T>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let snapshot = self.clone();
        let result = op(self);
        if result.is_err() {
            *self = snapshot;
        }
        result
    }
}
