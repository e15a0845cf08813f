//! `Ledger` over SPL Token accounts.
//!
//! The router PDA is the spending delegate. Direct distributions spend the
//! standing SPL delegation; permit distributions are additionally capped at
//! the permitted value for the rest of the instruction.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_error::ProgramError;
use anchor_lang::solana_program::program_option::COption;
use anchor_lang::solana_program::sysvar::instructions::{
    load_current_index_checked, load_instruction_at_checked,
};
use anchor_spl::token::{self, TokenAccount, TransferChecked};

use crate::engine::ledger::{Ledger, OfflineAuthorization};
use crate::engine::permit::{domain_separator, verify_ed25519_instruction, PermitMessage};
use crate::engine::scoped_allowance::ScopedAllowance;
use crate::errors::ErrorCode;
use crate::states::PermitNonce;

/// Accounts only the permit path needs.
pub struct PermitAccounts<'a, 'info> {
    /// Instructions sysvar, used to read the Ed25519 proof
    pub instructions: AccountInfo<'info>,
    pub nonce: &'a mut PermitNonce,
}

pub struct SplLedger<'a, 'info> {
    token_program: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    decimals: u8,
    delegate: AccountInfo<'info>,
    signer_seeds: &'a [&'a [&'a [u8]]],
    accounts: Vec<(Pubkey, AccountInfo<'info>)>,
    permit: Option<PermitAccounts<'a, 'info>>,
    scoped_allowance: Option<ScopedAllowance>,
}

impl<'a, 'info> SplLedger<'a, 'info> {
    pub fn new(
        token_program: AccountInfo<'info>,
        mint: AccountInfo<'info>,
        decimals: u8,
        delegate: AccountInfo<'info>,
        signer_seeds: &'a [&'a [&'a [u8]]],
    ) -> Self {
        Self {
            token_program,
            mint,
            decimals,
            delegate,
            signer_seeds,
            accounts: Vec::new(),
            permit: None,
            scoped_allowance: None,
        }
    }

    /// Registers a token account under the identity the engine uses for it.
    /// Usually its own key; the sink token account is registered as `SINK_ACCOUNT`.
    pub fn with_account(mut self, identity: Pubkey, info: AccountInfo<'info>) -> Self {
        self.accounts.push((identity, info));
        self
    }

    pub fn with_permit(mut self, permit: PermitAccounts<'a, 'info>) -> Self {
        self.permit = Some(permit);
        self
    }

    fn account(&self, identity: &Pubkey) -> Result<&AccountInfo<'info>> {
        self.accounts
            .iter()
            .find(|(key, _)| key == identity)
            .map(|(_, info)| info)
            .ok_or_else(|| ProgramError::NotEnoughAccountKeys.into())
    }

    fn token_account(&self, identity: &Pubkey) -> Result<TokenAccount> {
        let info = self.account(identity)?;
        let data = info.try_borrow_data()?;
        TokenAccount::try_deserialize(&mut &data[..])
    }
}

impl<'a, 'info> Ledger for SplLedger<'a, 'info> {
    fn balance_of(&self, account: &Pubkey) -> Result<u64> {
        Ok(self.token_account(account)?.amount)
    }

    fn allowance(&self, owner: &Pubkey, spender: &Pubkey) -> Result<u64> {
        let account = self.token_account(owner)?;
        let delegated = match account.delegate {
            COption::Some(delegate) if delegate == *spender => account.delegated_amount,
            _ => 0,
        };
        Ok(match &self.scoped_allowance {
            Some(scope) => scope.cap(owner, delegated),
            None => delegated,
        })
    }

    fn authority_of(&self, account: &Pubkey) -> Result<Pubkey> {
        Ok(self.token_account(account)?.owner)
    }

    fn move_value(&mut self, spender: &Pubkey, from: &Pubkey, to: &Pubkey, amount: u64) -> Result<()> {
        if *spender != self.delegate.key() {
            return Err(ProgramError::MissingRequiredSignature.into());
        }
        if let Some(scope) = self.scoped_allowance.as_mut() {
            scope.spend(from, amount)?;
        }

        let from_info = self.account(from)?.clone();
        let to_info = self.account(to)?.clone();
        token::transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                TransferChecked {
                    from: from_info,
                    mint: self.mint.clone(),
                    to: to_info,
                    authority: self.delegate.clone(),
                },
                self.signer_seeds,
            ),
            amount,
            self.decimals,
        )
    }

    fn grant_allowance(&mut self, owner: &Pubkey, spender: &Pubkey, amount: u64) -> Result<()> {
        if *spender != self.delegate.key() {
            return Err(ProgramError::InvalidArgument.into());
        }
        self.scoped_allowance = Some(ScopedAllowance::new(*owner, amount));
        Ok(())
    }

    fn consume_offline_authorization(&mut self, authorization: &OfflineAuthorization, now: i64) -> Result<()> {
        require!(now <= authorization.expiry, ErrorCode::AuthorizationExpired);
        require_keys_eq!(authorization.spender, self.delegate.key(), ErrorCode::AuthorizationInvalid);

        let signer = self
            .authority_of(&authorization.owner)
            .map_err(|_| error!(ErrorCode::AuthorizationInvalid))?;
        let domain = domain_separator(&crate::ID, &self.mint.key());

        let permit = self
            .permit
            .as_mut()
            .ok_or_else(|| error!(ErrorCode::AuthorizationInvalid))?;
        require_keys_eq!(permit.nonce.owner, authorization.owner, ErrorCode::AuthorizationInvalid);

        let digest = PermitMessage {
            owner: authorization.owner,
            spender: authorization.spender,
            value: authorization.value,
            nonce: permit.nonce.nonce,
            expiry: authorization.expiry,
        }
        .digest(&domain);

        // the proof is the instruction right before this one
        let current = load_current_index_checked(&permit.instructions)
            .map_err(|_| error!(ErrorCode::AuthorizationInvalid))?;
        let proof_index = current
            .checked_sub(1)
            .ok_or_else(|| error!(ErrorCode::AuthorizationInvalid))?;
        let proof = load_instruction_at_checked(usize::from(proof_index), &permit.instructions)
            .map_err(|_| error!(ErrorCode::AuthorizationInvalid))?;
        verify_ed25519_instruction(&proof, &signer, &digest, &authorization.signature)?;

        permit.nonce.advance()?;
        msg!("Permit nonce for {} advanced to {}", authorization.owner, permit.nonce.nonce);

        self.grant_allowance(&authorization.owner, &authorization.spender, authorization.value)
    }

    /// A failing instruction reverts every account write and CPI it made.
    fn atomically<T, F>(&mut self, op: F) -> Result<T>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<T>,
    {
        op(self)
    }
}
