//! Subscription ledger: the accounting core.
//!
//! Rows live in one flat table keyed by `keccak256(provider ‖ hash)`. A row is
//! written once by `open`; afterwards only its balance moves. Every balance
//! change is mirrored in the per-asset escrow total with checked arithmetic.
//!
//! State is always written before any asset leaves or enters custody. A
//! failed transfer after that point is returned as an error, and the host
//! reverts every storage write of the call, so the ledger and custody can
//! never disagree.

use stylus_sdk::{
    alloy_primitives::{keccak256, Address, B256, U256},
    prelude::*,
};

use crate::assets::NATIVE_TOKEN;
use crate::errors::{
    ArithmeticOverflow, AssetMismatch, EscrowError, EscrowTotalMismatch, InsufficientBalance,
    InvalidSignature, SubscriptionExists, SubscriptionNotFound, UnexpectedValue, ZeroAmount,
};
use crate::events::{FundsDeposit, FundsRefund, FundsWithdrawn, SubscriptionCreated};
use crate::signature::recover_signer;
use crate::NotificationEscrow;

/// Who receives funds released from a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Payee {
    Provider,
    Consumer,
}

/// Storage key of the `(provider, hash)` row: `keccak256(provider ‖ hash)`.
pub fn subscription_key(provider: Address, hash: B256) -> B256 {
    let mut packed = [0u8; 52];
    packed[..20].copy_from_slice(provider.as_slice());
    packed[20..].copy_from_slice(hash.as_slice());
    keccak256(packed)
}

pub fn checked_credit(balance: U256, amount: U256) -> Result<U256, EscrowError> {
    balance
        .checked_add(amount)
        .ok_or(EscrowError::ArithmeticOverflow(ArithmeticOverflow {}))
}

pub fn checked_debit(balance: U256, amount: U256) -> Result<U256, EscrowError> {
    balance
        .checked_sub(amount)
        .ok_or(EscrowError::InsufficientBalance(InsufficientBalance {
            available: balance,
            requested: amount,
        }))
}

impl NotificationEscrow {
    pub(crate) fn open(
        &mut self,
        provider: Address,
        hash: B256,
        signature: &[u8],
        token: Address,
        amount: U256,
    ) -> Result<(), EscrowError> {
        self.when_not_paused()?;
        self.require_current_schema()?;
        self.require_whitelisted_token(token)?;
        self.require_whitelisted_provider(provider)?;
        self.require_registered(provider)?;
        let funded = self.funded_amount(token, amount)?;

        let key = subscription_key(provider, hash);
        if self.exists_at(key) {
            return Err(EscrowError::SubscriptionExists(SubscriptionExists { provider, hash }));
        }

        let recovered = recover_signer(hash, signature).unwrap_or(Address::ZERO);
        if recovered != provider {
            return Err(EscrowError::InvalidSignature(InvalidSignature { recovered }));
        }

        let consumer = self.vm().msg_sender();
        {
            let mut entry = self.subscriptions.setter(key);
            entry.token.set(token);
            entry.consumer.set(consumer);
            entry.provider_signature.set_bytes(signature);
        }
        self.credit(key, token, funded)?;

        if token != NATIVE_TOKEN {
            self.pull_token(token, consumer, funded)?;
        }

        log(
            self.vm(),
            SubscriptionCreated {
                hash,
                provider,
                token,
                amount: funded,
            },
        );
        Ok(())
    }

    pub(crate) fn top_up(
        &mut self,
        provider: Address,
        hash: B256,
        token: Address,
        amount: U256,
    ) -> Result<(), EscrowError> {
        self.when_not_paused()?;
        self.require_current_schema()?;
        self.require_whitelisted_token(token)?;
        self.require_whitelisted_provider(provider)?;
        self.require_registered(provider)?;

        let key = subscription_key(provider, hash);
        self.require_asset(provider, hash, key, token)?;
        let funded = self.funded_amount(token, amount)?;

        self.credit(key, token, funded)?;

        if token != NATIVE_TOKEN {
            let payer = self.vm().msg_sender();
            self.pull_token(token, payer, funded)?;
        }

        log(
            self.vm(),
            FundsDeposit {
                hash,
                amount: funded,
                token,
            },
        );
        Ok(())
    }

    /// Release `amount` from one of the caller's subscriptions.
    pub(crate) fn settle(
        &mut self,
        hash: B256,
        token: Address,
        amount: U256,
        payee: Payee,
    ) -> Result<(), EscrowError> {
        self.when_not_paused()?;
        self.require_current_schema()?;

        let provider = self.vm().msg_sender();
        self.require_registered(provider)?;

        if amount.is_zero() {
            return Err(EscrowError::ZeroAmount(ZeroAmount {}));
        }

        let key = subscription_key(provider, hash);
        self.require_asset(provider, hash, key, token)?;

        let recipient = match payee {
            Payee::Provider => provider,
            Payee::Consumer => self.subscriptions.get(key).consumer.get(),
        };

        self.debit(key, token, amount)?;
        self.push(token, recipient, amount)?;

        match payee {
            Payee::Provider => log(self.vm(), FundsWithdrawn { hash, amount, token }),
            Payee::Consumer => log(self.vm(), FundsRefund { hash, amount, token }),
        }
        Ok(())
    }

    pub(crate) fn exists_at(&self, key: B256) -> bool {
        !self.subscriptions.get(key).provider_signature.is_empty()
    }

    /// The row must exist and be denominated in `token`.
    fn require_asset(
        &self,
        provider: Address,
        hash: B256,
        key: B256,
        token: Address,
    ) -> Result<(), EscrowError> {
        if !self.exists_at(key) {
            return Err(EscrowError::SubscriptionNotFound(SubscriptionNotFound {
                provider,
                hash,
            }));
        }

        let expected = self.subscriptions.get(key).token.get();
        if expected != token {
            return Err(EscrowError::AssetMismatch(AssetMismatch {
                expected,
                supplied: token,
            }));
        }
        Ok(())
    }

    /// Amount a funding call brings in: `msg.value` for ETH, `amount` for a
    /// token (which must not carry ETH along).
    fn funded_amount(&self, token: Address, amount: U256) -> Result<U256, EscrowError> {
        let value = self.vm().msg_value();

        if token == NATIVE_TOKEN {
            if value.is_zero() {
                return Err(EscrowError::ZeroAmount(ZeroAmount {}));
            }
            return Ok(value);
        }

        if amount.is_zero() {
            return Err(EscrowError::ZeroAmount(ZeroAmount {}));
        }
        if !value.is_zero() {
            return Err(EscrowError::UnexpectedValue(UnexpectedValue { value }));
        }
        Ok(amount)
    }

    fn credit(&mut self, key: B256, token: Address, amount: U256) -> Result<(), EscrowError> {
        let balance = checked_credit(self.subscriptions.get(key).balance.get(), amount)?;
        let total = checked_credit(self.escrow_totals.get(token), amount)?;

        self.subscriptions.setter(key).balance.set(balance);
        self.escrow_totals.insert(token, total);
        Ok(())
    }

    fn debit(&mut self, key: B256, token: Address, amount: U256) -> Result<(), EscrowError> {
        let balance = checked_debit(self.subscriptions.get(key).balance.get(), amount)?;
        // Only reachable when `migrate` seeded a total below the real holdings.
        let recorded = self.escrow_totals.get(token);
        let total = recorded
            .checked_sub(amount)
            .ok_or(EscrowError::EscrowTotalMismatch(EscrowTotalMismatch {
                token,
                recorded,
                requested: amount,
            }))?;

        self.subscriptions.setter(key).balance.set(balance);
        self.escrow_totals.insert(token, total);
        Ok(())
    }
}
