//! Events emitted by the escrow for off-chain indexing.
//!
//! The notification service listens for `ProviderRegistered` and
//! `SubscriptionCreated`; the fund movement events let indexers rebuild every
//! subscription balance from the log alone.

use alloy_sol_types::sol;

sol! {
    // Directory
    event ProviderRegistered(address indexed provider, string url);

    // Ledger
    event SubscriptionCreated(bytes32 indexed hash, address indexed provider, address token, uint256 amount);
    event FundsDeposit(bytes32 indexed hash, uint256 amount, address token);
    event FundsWithdrawn(bytes32 indexed hash, uint256 amount, address token);
    event FundsRefund(bytes32 indexed hash, uint256 amount, address token);

    // Lifecycle
    event Paused(address account);
    event Unpaused(address account);
    event OwnershipTransferred(address indexed previousOwner, address indexed newOwner);
    event Initialized(uint256 version);
    event SchemaMigrated(uint256 fromVersion, uint256 toVersion);
}
