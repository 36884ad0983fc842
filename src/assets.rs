//! Moving escrowed assets in and out of contract custody.
//!
//! ETH arrives with the call itself (`msg.value`) and leaves through a value
//! transfer. ERC-20 tokens are pulled with `transferFrom` against the
//! consumer's allowance and pushed with `transfer`. A token that reverts,
//! answers `false` or answers nothing fails the whole call.

use alloc::vec::Vec;

use alloy_sol_types::{sol, SolCall};
use stylus_sdk::{
    alloy_primitives::{Address, U256},
    prelude::*,
    stylus_core::calls::context::Call,
};

use crate::errors::{EscrowError, TransferFailed};
use crate::NotificationEscrow;

/// Sentinel token address standing for the chain's native currency.
pub const NATIVE_TOKEN: Address = Address::ZERO;

sol! {
    interface IERC20 {
        function transfer(address to, uint256 value) external returns (bool);
        function transferFrom(address from, address to, uint256 value) external returns (bool);
    }
}

fn transfer_failed(token: Address, to: Address, amount: U256) -> EscrowError {
    EscrowError::TransferFailed(TransferFailed { token, to, amount })
}

impl NotificationEscrow {
    /// Pull `amount` of an ERC-20 from `from` into custody.
    pub(crate) fn pull_token(&mut self, token: Address, from: Address, amount: U256) -> Result<(), EscrowError> {
        let custody = self.vm().contract_address();
        let call = IERC20::transferFromCall {
            from,
            to: custody,
            value: amount,
        };

        let accepted = self
            .call_token(token, call.abi_encode())
            .and_then(|output| IERC20::transferFromCall::abi_decode_returns(&output, true).ok())
            .is_some_and(|answer| answer._0);
        if !accepted {
            return Err(transfer_failed(token, custody, amount));
        }
        Ok(())
    }

    /// Send `amount` of `token` (or ETH) out of custody to `to`.
    pub(crate) fn push(&mut self, token: Address, to: Address, amount: U256) -> Result<(), EscrowError> {
        if token == NATIVE_TOKEN {
            return self
                .vm()
                .transfer_eth(to, amount)
                .map_err(|_| transfer_failed(token, to, amount));
        }

        let call = IERC20::transferCall { to, value: amount };
        let accepted = self
            .call_token(token, call.abi_encode())
            .and_then(|output| IERC20::transferCall::abi_decode_returns(&output, true).ok())
            .is_some_and(|answer| answer._0);
        if !accepted {
            return Err(transfer_failed(token, to, amount));
        }
        Ok(())
    }

    /// Raw return data, or `None` if the token reverted.
    fn call_token(&mut self, token: Address, calldata: Vec<u8>) -> Option<Vec<u8>> {
        self.vm().call(&Call::new(), token, &calldata).ok()
    }
}
