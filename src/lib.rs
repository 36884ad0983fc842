//! Notification Escrow Contract
//!
//! Escrow ledger for a notification marketplace:
//! - Owner-managed whitelist of tokens and providers
//! - Provider directory (endpoint URLs)
//! - Provider-signed subscriptions funded in ETH or an approved ERC-20
//! - Withdraw (to provider) and refund (to consumer) against each subscription
//! - Pause switch and in-place upgrade support through an append-only layout

#![cfg_attr(not(any(test, feature = "export-abi")), no_main)]
#![cfg_attr(not(any(test, feature = "export-abi")), no_std)]

extern crate alloc;
use alloc::{string::String, vec, vec::Vec};

use stylus_sdk::{
    abi::Bytes,
    alloy_primitives::{Address, B256, U256},
    prelude::*,
};

pub mod assets;
mod directory;
pub mod errors;
pub mod events;
mod guard;
pub mod ledger;
pub mod migration;
pub mod signature;
mod whitelist;

pub use assets::NATIVE_TOKEN;
pub use errors::{ErrorKind, EscrowError};
pub use migration::SCHEMA_VERSION;

use errors::InvalidSignature;
use ledger::Payee;

// =============================================================================
// STORAGE
// =============================================================================

sol_storage! {
    /// Fields are only ever appended: the contract sits behind an upgrade proxy
    /// and every deployed version must read the same slots.
    #[entrypoint]
    pub struct NotificationEscrow {
        // v1
        bool initialized;
        address owner;
        bool paused;
        mapping(address => bool) whitelisted_tokens;
        mapping(address => bool) whitelisted_providers;
        mapping(address => string) provider_urls;
        mapping(bytes32 => Subscription) subscriptions;

        // v2
        uint256 schema_version;
        mapping(address => uint256) escrow_totals;
    }

    /// One ledger row, keyed by `ledger::subscription_key(provider, hash)`.
    pub struct Subscription {
        address token;
        address consumer;
        /// Empty until the row is created; doubles as the existence marker.
        bytes provider_signature;
        uint256 balance;
    }
}

#[public]
impl NotificationEscrow {
    // =============================================================================
    // INITIALIZATION & OWNERSHIP
    // =============================================================================

    /// Proxy initializer. The caller becomes the owner.
    pub fn initialize(&mut self) -> Result<(), EscrowError> {
        self.init_once()
    }

    pub fn owner(&self) -> Address {
        self.owner.get()
    }

    pub fn transfer_ownership(&mut self, new_owner: Address) -> Result<(), EscrowError> {
        self.only_owner()?;
        self.hand_over(new_owner)
    }

    // =============================================================================
    // LIFECYCLE
    // =============================================================================

    pub fn paused(&self) -> bool {
        self.paused.get()
    }

    pub fn pause(&mut self) -> Result<(), EscrowError> {
        let owner = self.only_owner()?;
        self.when_not_paused()?;
        self.set_paused(owner, true);
        Ok(())
    }

    pub fn unpause(&mut self) -> Result<(), EscrowError> {
        let owner = self.only_owner()?;
        self.when_paused()?;
        self.set_paused(owner, false);
        Ok(())
    }

    // =============================================================================
    // WHITELIST
    // =============================================================================

    /// @param token ERC-20 address, or `NATIVE_TOKEN` for ETH
    pub fn set_whitelisted_tokens(&mut self, token: Address, flag: bool) -> Result<(), EscrowError> {
        self.only_owner()?;
        self.whitelisted_tokens.insert(token, flag);
        Ok(())
    }

    pub fn set_whitelisted_provider(&mut self, provider: Address, flag: bool) -> Result<(), EscrowError> {
        self.only_owner()?;
        self.whitelisted_providers.insert(provider, flag);
        Ok(())
    }

    pub fn is_whitelisted_token(&self, token: Address) -> bool {
        self.whitelisted_tokens.get(token)
    }

    pub fn is_whitelisted_provider(&self, provider: Address) -> bool {
        self.whitelisted_providers.get(provider)
    }

    // =============================================================================
    // PROVIDER DIRECTORY
    // =============================================================================

    /// Register the caller's endpoint, or replace it.
    pub fn register_provider(&mut self, url: String) -> Result<(), EscrowError> {
        self.register(url)
    }

    pub fn provider_url(&self, provider: Address) -> String {
        self.provider_urls.get(provider).get_string()
    }

    pub fn is_registered_provider(&self, provider: Address) -> bool {
        self.is_registered(provider)
    }

    // =============================================================================
    // SIGNATURES
    // =============================================================================

    /// Address that personal-signed `message_hash`.
    pub fn recover_signer(&self, message_hash: B256, signature: Bytes) -> Result<Address, EscrowError> {
        crate::signature::recover_signer(message_hash, &signature).map_err(|_| {
            EscrowError::InvalidSignature(InvalidSignature {
                recovered: Address::ZERO,
            })
        })
    }

    // =============================================================================
    // SUBSCRIPTION LEDGER
    // =============================================================================

    /// Open and fund a subscription to `provider`.
    /// @param signature provider's personal signature over `hash`
    /// @param amount token amount; ignored for ETH, where `msg.value` is used
    #[payable]
    pub fn create_subscription(
        &mut self,
        provider: Address,
        hash: B256,
        signature: Bytes,
        token: Address,
        amount: U256,
    ) -> Result<(), EscrowError> {
        self.open(provider, hash, &signature, token, amount)
    }

    /// Top up an existing subscription. Anyone may fund it.
    #[payable]
    pub fn deposit_funds(
        &mut self,
        provider: Address,
        hash: B256,
        token: Address,
        amount: U256,
    ) -> Result<(), EscrowError> {
        self.top_up(provider, hash, token, amount)
    }

    /// Provider collects `amount` from one of its subscriptions.
    pub fn withdraw_funds(&mut self, hash: B256, token: Address, amount: U256) -> Result<(), EscrowError> {
        self.settle(hash, token, amount, Payee::Provider)
    }

    /// Provider returns `amount` to the subscription's consumer.
    pub fn refund_funds(&mut self, hash: B256, token: Address, amount: U256) -> Result<(), EscrowError> {
        self.settle(hash, token, amount, Payee::Consumer)
    }

    /// (token, consumer, provider signature, balance)
    pub fn get_subscription(&self, provider: Address, hash: B256) -> (Address, Address, Bytes, U256) {
        let entry = self.subscriptions.get(ledger::subscription_key(provider, hash));
        (
            entry.token.get(),
            entry.consumer.get(),
            Bytes::from(entry.provider_signature.get_bytes()),
            entry.balance.get(),
        )
    }

    pub fn subscription_balance(&self, provider: Address, hash: B256) -> U256 {
        self.subscriptions
            .get(ledger::subscription_key(provider, hash))
            .balance
            .get()
    }

    pub fn subscription_exists(&self, provider: Address, hash: B256) -> bool {
        self.exists_at(ledger::subscription_key(provider, hash))
    }

    /// Sum of all subscription balances denominated in `token`.
    pub fn total_escrowed(&self, token: Address) -> U256 {
        self.escrow_totals.get(token)
    }

    // =============================================================================
    // UPGRADES
    // =============================================================================

    pub fn schema_version(&self) -> U256 {
        self.stored_schema_version()
    }

    /// Bring a v1 layout up to date.
    /// @param tokens assets held in escrow at upgrade time
    /// @param totals escrowed amount per asset, reconciled from the event log
    ///
    /// A total seeded below the real holdings makes later payouts of that
    /// asset fail with `EscrowTotalMismatch` once the total runs dry.
    pub fn migrate(&mut self, tokens: Vec<Address>, totals: Vec<U256>) -> Result<(), EscrowError> {
        self.only_owner()?;
        self.upgrade_schema(&tokens, &totals)
    }
}
