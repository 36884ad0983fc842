//! Custom errors returned by every escrow entry point.
//!
//! Each error is a Solidity custom error so callers receive an ABI-encoded
//! reason that names the violated precondition. Returning any of them from a
//! public method reverts the whole call.

use alloy_sol_types::sol;
use stylus_sdk::prelude::*;

sol! {
    // Authorization
    #[derive(Debug, PartialEq, Eq)]
    error NotOwner(address caller);
    #[derive(Debug, PartialEq, Eq)]
    error ProviderNotWhitelisted(address provider);
    #[derive(Debug, PartialEq, Eq)]
    error ProviderNotRegistered(address provider);

    // Validation
    #[derive(Debug, PartialEq, Eq)]
    error EmptyUrl();
    #[derive(Debug, PartialEq, Eq)]
    error ZeroAmount();
    #[derive(Debug, PartialEq, Eq)]
    error AssetMismatch(address expected, address supplied);
    #[derive(Debug, PartialEq, Eq)]
    error TokenNotWhitelisted(address token);
    #[derive(Debug, PartialEq, Eq)]
    error UnexpectedValue(uint256 value);
    #[derive(Debug, PartialEq, Eq)]
    error SubscriptionNotFound(address provider, bytes32 hash);
    #[derive(Debug, PartialEq, Eq)]
    error InvalidOwner(address owner);
    #[derive(Debug, PartialEq, Eq)]
    error ArithmeticOverflow();
    #[derive(Debug, PartialEq, Eq)]
    error MigrationMismatch(uint256 tokens, uint256 totals);

    // Conflict
    #[derive(Debug, PartialEq, Eq)]
    error SubscriptionExists(address provider, bytes32 hash);
    #[derive(Debug, PartialEq, Eq)]
    error AlreadyInitialized();
    #[derive(Debug, PartialEq, Eq)]
    error SchemaUpToDate(uint256 version);

    // Integrity
    #[derive(Debug, PartialEq, Eq)]
    error InvalidSignature(address recovered);
    #[derive(Debug, PartialEq, Eq)]
    error EscrowTotalMismatch(address token, uint256 recorded, uint256 requested);

    // Balance
    #[derive(Debug, PartialEq, Eq)]
    error InsufficientBalance(uint256 available, uint256 requested);

    // Lifecycle
    #[derive(Debug, PartialEq, Eq)]
    error EnforcedPause();
    #[derive(Debug, PartialEq, Eq)]
    error ExpectedPause();
    #[derive(Debug, PartialEq, Eq)]
    error SchemaOutdated(uint256 version);

    // Asset movement
    #[derive(Debug, PartialEq, Eq)]
    error TransferFailed(address token, address to, uint256 amount);
}

#[derive(SolidityError, Debug, PartialEq, Eq)]
pub enum EscrowError {
    NotOwner(NotOwner),
    ProviderNotWhitelisted(ProviderNotWhitelisted),
    ProviderNotRegistered(ProviderNotRegistered),
    EmptyUrl(EmptyUrl),
    ZeroAmount(ZeroAmount),
    AssetMismatch(AssetMismatch),
    TokenNotWhitelisted(TokenNotWhitelisted),
    UnexpectedValue(UnexpectedValue),
    SubscriptionNotFound(SubscriptionNotFound),
    InvalidOwner(InvalidOwner),
    ArithmeticOverflow(ArithmeticOverflow),
    MigrationMismatch(MigrationMismatch),
    SubscriptionExists(SubscriptionExists),
    AlreadyInitialized(AlreadyInitialized),
    SchemaUpToDate(SchemaUpToDate),
    InvalidSignature(InvalidSignature),
    EscrowTotalMismatch(EscrowTotalMismatch),
    InsufficientBalance(InsufficientBalance),
    EnforcedPause(EnforcedPause),
    ExpectedPause(ExpectedPause),
    SchemaOutdated(SchemaOutdated),
    TransferFailed(TransferFailed),
}

/// Coarse classification of [`EscrowError`] for callers that only care about
/// which kind of precondition failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Authorization,
    Validation,
    Conflict,
    Integrity,
    InsufficientBalance,
    Lifecycle,
    TransferFailure,
}

impl EscrowError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EscrowError::NotOwner(_)
            | EscrowError::ProviderNotWhitelisted(_)
            | EscrowError::ProviderNotRegistered(_) => ErrorKind::Authorization,
            EscrowError::EmptyUrl(_)
            | EscrowError::ZeroAmount(_)
            | EscrowError::AssetMismatch(_)
            | EscrowError::TokenNotWhitelisted(_)
            | EscrowError::UnexpectedValue(_)
            | EscrowError::SubscriptionNotFound(_)
            | EscrowError::InvalidOwner(_)
            | EscrowError::ArithmeticOverflow(_)
            | EscrowError::MigrationMismatch(_) => ErrorKind::Validation,
            EscrowError::SubscriptionExists(_)
            | EscrowError::AlreadyInitialized(_)
            | EscrowError::SchemaUpToDate(_) => ErrorKind::Conflict,
            EscrowError::InvalidSignature(_) | EscrowError::EscrowTotalMismatch(_) => {
                ErrorKind::Integrity
            }
            EscrowError::InsufficientBalance(_) => ErrorKind::InsufficientBalance,
            EscrowError::EnforcedPause(_)
            | EscrowError::ExpectedPause(_)
            | EscrowError::SchemaOutdated(_) => ErrorKind::Lifecycle,
            EscrowError::TransferFailed(_) => ErrorKind::TransferFailure,
        }
    }
}
