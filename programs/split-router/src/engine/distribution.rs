use anchor_lang::prelude::*;
use crate::constants::SINK_ACCOUNT;
use crate::engine::ledger::{Ledger, OfflineAuthorization};
use crate::engine::lock::OperationLock;
use crate::engine::split::SplitAmounts;
use crate::errors::ErrorCode;
use crate::events::DistributionExecuted;
use crate::states::RouterConfig;

/// Runs the three-leg split of one router against a ledger.
pub struct DistributionEngine<'a> {
    router: Pubkey,
    config: &'a mut RouterConfig,
}

impl<'a> DistributionEngine<'a> {
    pub fn new(router: Pubkey, config: &'a mut RouterConfig) -> Self {
        Self { router, config }
    }

    /// Splits `amount` out of `source`, spending the allowance `source` granted the router.
    /// `sender` must control `source`.
    pub fn distribute<L: Ledger>(
        &mut self,
        ledger: &mut L,
        sender: &Pubkey,
        source: &Pubkey,
        recipient: &Pubkey,
        amount: u64,
        now: i64,
    ) -> Result<DistributionExecuted> {
        self.config.breaker.ensure_active()?;
        validate_request(recipient, amount)?;

        let authority = ledger.authority_of(source)?;
        require_keys_eq!(authority, *sender, ErrorCode::Unauthorized);

        let split = ledger.atomically(|ledger| self.execute_split(ledger, source, recipient, amount))?;
        Ok(self.executed(sender, source, recipient, amount, split, now))
    }

    /// Consumes an offline authorization signed by `owner`'s authority and splits
    /// `amount` out of `owner` in the same atomic scope. Any `sender` may submit.
    #[allow(clippy::too_many_arguments)]
    pub fn distribute_with_authorization<L: Ledger>(
        &mut self,
        ledger: &mut L,
        sender: &Pubkey,
        owner: &Pubkey,
        recipient: &Pubkey,
        amount: u64,
        expiry: i64,
        signature: [u8; 64],
        now: i64,
    ) -> Result<DistributionExecuted> {
        self.config.breaker.ensure_active()?;
        validate_request(recipient, amount)?;

        let authorization = OfflineAuthorization {
            owner: *owner,
            spender: self.router,
            value: amount,
            expiry,
            signature,
        };
        let split = ledger.atomically(|ledger| {
            ledger.consume_offline_authorization(&authorization, now)?;
            self.execute_split(ledger, owner, recipient, amount)
        })?;
        Ok(self.executed(sender, owner, recipient, amount, split, now))
    }

    fn execute_split<L: Ledger>(
        &mut self,
        ledger: &mut L,
        source: &Pubkey,
        recipient: &Pubkey,
        amount: u64,
    ) -> Result<SplitAmounts> {
        let split = self.config.ratios.split(amount)?;
        let treasury = self.config.ratios.treasury;
        let router = self.router;

        let _lock = OperationLock::acquire(&mut self.config.locked)?;

        let legs = [
            (treasury, split.fund_amount),
            (SINK_ACCOUNT, split.burn_amount),
            (*recipient, split.recipient_amount),
        ];
        for (destination, leg_amount) in legs {
            if leg_amount == 0 {
                continue;
            }
            ledger
                .move_value(&router, source, &destination, leg_amount)
                .map_err(|e| {
                    msg!("Move of {} to {} failed: {}", leg_amount, destination, e);
                    error!(ErrorCode::LedgerMoveFailed)
                })?;
        }

        Ok(split)
    }

    fn executed(
        &self,
        sender: &Pubkey,
        source: &Pubkey,
        recipient: &Pubkey,
        amount: u64,
        split: SplitAmounts,
        now: i64,
    ) -> DistributionExecuted {
        DistributionExecuted {
            router: self.router,
            sender: *sender,
            source: *source,
            recipient: *recipient,
            total_amount: amount,
            fund_amount: split.fund_amount,
            burn_amount: split.burn_amount,
            recipient_amount: split.recipient_amount,
            timestamp: now,
        }
    }
}

fn validate_request(recipient: &Pubkey, amount: u64) -> Result<()> {
    require!(amount > 0, ErrorCode::InvalidAmount);
    require_keys_neq!(*recipient, Pubkey::default(), ErrorCode::InvalidRecipient);
    require_keys_neq!(*recipient, SINK_ACCOUNT, ErrorCode::InvalidRecipient);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::address::InstanceArgs;
    use crate::engine::testing::{principal_of, signing_key, MemoryLedger};

    const NOW: i64 = 1_700_000_000;

    struct Fixture {
        ledger: MemoryLedger,
        config: RouterConfig,
        router: Pubkey,
        owner_key: ed25519_dalek::SigningKey,
        owner: Pubkey,
        source: Pubkey,
        recipient: Pubkey,
        treasury: Pubkey,
    }

    impl Fixture {
        fn new(fund_ratio_bps: u16, burn_ratio_bps: u16) -> Self {
            let router = Pubkey::new_from_array([50; 32]);
            let treasury = Pubkey::new_from_array([51; 32]);
            let source = Pubkey::new_from_array([52; 32]);
            let recipient = Pubkey::new_from_array([53; 32]);
            let owner_key = signing_key(7);
            let owner = principal_of(&owner_key);

            let mut config = RouterConfig::default();
            config
                .initialize(
                    Pubkey::new_from_array([54; 32]),
                    [1; 32],
                    &InstanceArgs {
                        fund_ratio_bps,
                        burn_ratio_bps,
                        treasury,
                        admin: Pubkey::new_from_array([55; 32]),
                    },
                    255,
                )
                .unwrap();

            let mut ledger = MemoryLedger::new(Pubkey::new_from_array([56; 32]));
            ledger.open_account(source, owner, 1_000);
            ledger.open_account(treasury, Pubkey::new_from_array([57; 32]), 0);
            ledger.open_account(recipient, Pubkey::new_from_array([58; 32]), 0);

            Self {
                ledger,
                config,
                router,
                owner_key,
                owner,
                source,
                recipient,
                treasury,
            }
        }

        fn distribute(&mut self, amount: u64) -> Result<DistributionExecuted> {
            let (owner, source, recipient) = (self.owner, self.source, self.recipient);
            DistributionEngine::new(self.router, &mut self.config)
                .distribute(&mut self.ledger, &owner, &source, &recipient, amount, NOW)
        }

        fn permit(&self, value: u64, expiry: i64) -> [u8; 64] {
            self.ledger
                .sign_permit(&self.owner_key, self.source, self.router, value, expiry)
        }

        fn distribute_with_permit(&mut self, sender: Pubkey, amount: u64, expiry: i64, signature: [u8; 64]) -> Result<DistributionExecuted> {
            let (source, recipient) = (self.source, self.recipient);
            DistributionEngine::new(self.router, &mut self.config).distribute_with_authorization(
                &mut self.ledger,
                &sender,
                &source,
                &recipient,
                amount,
                expiry,
                signature,
                NOW,
            )
        }

        fn balances(&self) -> (u64, u64, u64, u64) {
            let balance = |account: &Pubkey| self.ledger.balance_of(account).unwrap();
            (
                balance(&self.source),
                balance(&self.treasury),
                balance(&SINK_ACCOUNT),
                balance(&self.recipient),
            )
        }
    }

    #[test]
    fn splits_by_ratios() {
        let mut fx = Fixture::new(2000, 1000);
        fx.ledger.approve(fx.source, fx.router, 100);

        let event = fx.distribute(100).unwrap();
        assert_eq!((event.fund_amount, event.burn_amount, event.recipient_amount), (20, 10, 70));
        assert_eq!(event.total_amount, 100);
        assert_eq!(event.router, fx.router);
        assert_eq!(fx.balances(), (900, 20, 10, 70));
        assert_eq!(fx.ledger.allowance(&fx.source, &fx.router).unwrap(), 0);
    }

    #[test]
    fn zero_ratios_skip_treasury_and_sink() {
        let mut fx = Fixture::new(0, 0);
        fx.ledger.approve(fx.source, fx.router, 100);

        fx.distribute(100).unwrap();
        assert_eq!(fx.balances(), (900, 0, 0, 100));
        assert_eq!(fx.ledger.moves, vec![(fx.source, fx.recipient, 100)]);
    }

    #[test]
    fn full_ratios_skip_recipient() {
        let mut fx = Fixture::new(5000, 5000);
        fx.ledger.approve(fx.source, fx.router, 100);

        let event = fx.distribute(100).unwrap();
        assert_eq!((event.fund_amount, event.burn_amount, event.recipient_amount), (50, 50, 0));
        assert_eq!(fx.ledger.moves.len(), 2);
        assert_eq!(fx.balances(), (900, 50, 50, 0));
    }

    #[test]
    fn rounding_remainder_goes_to_recipient() {
        let mut fx = Fixture::new(2000, 1000);
        fx.ledger.approve(fx.source, fx.router, 10);

        fx.distribute(10).unwrap();
        assert_eq!(fx.balances(), (990, 2, 1, 7));
    }

    #[test]
    fn source_may_be_recipient() {
        let mut fx = Fixture::new(2000, 1000);
        fx.recipient = fx.source;
        fx.ledger.approve(fx.source, fx.router, 100);

        fx.distribute(100).unwrap();
        assert_eq!(fx.ledger.balance_of(&fx.source).unwrap(), 970);
    }

    #[test]
    fn rejects_bad_requests_before_moving() {
        let mut fx = Fixture::new(2000, 1000);
        fx.ledger.approve(fx.source, fx.router, 100);

        assert_eq!(fx.distribute(0).unwrap_err(), ErrorCode::InvalidAmount.into());

        fx.recipient = Pubkey::default();
        assert_eq!(fx.distribute(100).unwrap_err(), ErrorCode::InvalidRecipient.into());
        fx.recipient = SINK_ACCOUNT;
        assert_eq!(fx.distribute(100).unwrap_err(), ErrorCode::InvalidRecipient.into());

        assert!(fx.ledger.moves.is_empty());
        assert_eq!(fx.ledger.balance_of(&fx.source).unwrap(), 1_000);
    }

    #[test]
    fn sender_must_control_source() {
        let mut fx = Fixture::new(2000, 1000);
        fx.ledger.approve(fx.source, fx.router, 100);
        fx.owner = Pubkey::new_from_array([99; 32]);

        assert_eq!(fx.distribute(100).unwrap_err(), ErrorCode::Unauthorized.into());
        assert!(fx.ledger.moves.is_empty());
    }

    #[test]
    fn insufficient_allowance_fails_without_effects() {
        let mut fx = Fixture::new(2000, 1000);
        // covers the treasury and sink legs but not the recipient leg
        fx.ledger.approve(fx.source, fx.router, 50);

        let err = fx.distribute(100).unwrap_err();
        assert_eq!(err, ErrorCode::LedgerMoveFailed.into());
        assert_eq!(fx.balances(), (1_000, 0, 0, 0));
        assert_eq!(fx.ledger.allowance(&fx.source, &fx.router).unwrap(), 50);
        assert!(!fx.config.locked);
    }

    #[test]
    fn failing_last_leg_rolls_back_earlier_legs() {
        let mut fx = Fixture::new(2000, 1000);
        fx.ledger.approve(fx.source, fx.router, 100);
        fx.ledger.reject_credits_to(fx.recipient);

        let err = fx.distribute(100).unwrap_err();
        assert_eq!(err, ErrorCode::LedgerMoveFailed.into());
        assert_eq!(fx.balances(), (1_000, 0, 0, 0));
        assert!(fx.ledger.moves.is_empty());
    }

    #[test]
    fn paused_router_refuses_both_paths() {
        let mut fx = Fixture::new(2000, 1000);
        fx.ledger.approve(fx.source, fx.router, 100);
        fx.config.breaker.pause().unwrap();

        assert_eq!(fx.distribute(100).unwrap_err(), ErrorCode::Paused.into());

        let signature = fx.permit(100, NOW + 3600);
        let owner = fx.owner;
        let err = fx.distribute_with_permit(owner, 100, NOW + 3600, signature).unwrap_err();
        assert_eq!(err, ErrorCode::Paused.into());
        assert_eq!(fx.ledger.nonce_of(&fx.source), 0);
        assert_eq!(fx.balances(), (1_000, 0, 0, 0));
    }

    #[test]
    fn held_lock_rejects_reentry() {
        let mut fx = Fixture::new(2000, 1000);
        fx.ledger.approve(fx.source, fx.router, 100);
        fx.config.locked = true;

        assert_eq!(fx.distribute(100).unwrap_err(), ErrorCode::ReentrantCall.into());
        assert!(fx.ledger.moves.is_empty());
    }

    #[test]
    fn permit_is_single_use() {
        let mut fx = Fixture::new(2000, 1000);
        let expiry = NOW + 3600;
        let signature = fx.permit(100, expiry);
        let owner = fx.owner;

        let event = fx.distribute_with_permit(owner, 100, expiry, signature).unwrap();
        assert_eq!((event.fund_amount, event.burn_amount, event.recipient_amount), (20, 10, 70));
        assert_eq!(fx.balances(), (900, 20, 10, 70));
        assert_eq!(fx.ledger.nonce_of(&fx.source), 1);

        let err = fx.distribute_with_permit(owner, 100, expiry, signature).unwrap_err();
        assert_eq!(err, ErrorCode::AuthorizationInvalid.into());
        assert_eq!(fx.balances(), (900, 20, 10, 70));
    }

    #[test]
    fn relayer_may_submit_permit() {
        let mut fx = Fixture::new(2000, 1000);
        let relayer = Pubkey::new_from_array([77; 32]);
        let signature = fx.permit(100, NOW + 60);

        let event = fx.distribute_with_permit(relayer, 100, NOW + 60, signature).unwrap();
        assert_eq!(event.sender, relayer);
        assert_eq!(event.source, fx.source);
        assert_eq!(fx.ledger.balance_of(&fx.recipient).unwrap(), 70);
    }

    #[test]
    fn expired_permit_fails_regardless_of_signature() {
        let mut fx = Fixture::new(2000, 1000);
        let owner = fx.owner;

        let signature = fx.permit(100, NOW - 1);
        let err = fx.distribute_with_permit(owner, 100, NOW - 1, signature).unwrap_err();
        assert_eq!(err, ErrorCode::AuthorizationExpired.into());

        let err = fx.distribute_with_permit(owner, 100, NOW - 1, [0; 64]).unwrap_err();
        assert_eq!(err, ErrorCode::AuthorizationExpired.into());
        assert_eq!(fx.ledger.nonce_of(&fx.source), 0);
    }

    #[test]
    fn permit_for_other_amount_or_signer_is_invalid() {
        let mut fx = Fixture::new(2000, 1000);
        let owner = fx.owner;

        let signature = fx.permit(50, NOW + 60);
        let err = fx.distribute_with_permit(owner, 100, NOW + 60, signature).unwrap_err();
        assert_eq!(err, ErrorCode::AuthorizationInvalid.into());

        let stranger = signing_key(9);
        let forged = fx
            .ledger
            .sign_permit(&stranger, fx.source, fx.router, 100, NOW + 60);
        let err = fx.distribute_with_permit(owner, 100, NOW + 60, forged).unwrap_err();
        assert_eq!(err, ErrorCode::AuthorizationInvalid.into());

        assert_eq!(fx.ledger.allowance(&fx.source, &fx.router).unwrap(), 0);
    }

    #[test]
    fn failed_leg_discards_consumed_permit() {
        let mut fx = Fixture::new(2000, 1000);
        fx.ledger.reject_credits_to(fx.treasury);
        let signature = fx.permit(100, NOW + 60);
        let owner = fx.owner;

        let err = fx.distribute_with_permit(owner, 100, NOW + 60, signature).unwrap_err();
        assert_eq!(err, ErrorCode::LedgerMoveFailed.into());
        assert_eq!(fx.ledger.nonce_of(&fx.source), 0);
        assert_eq!(fx.ledger.allowance(&fx.source, &fx.router).unwrap(), 0);
        assert!(!fx.config.locked);

        // the same permit is still usable once the ledger accepts credits again
        fx.ledger.rejected_destinations.clear();
        fx.distribute_with_permit(owner, 100, NOW + 60, signature).unwrap();
        assert_eq!(fx.ledger.nonce_of(&fx.source), 1);
    }
}
