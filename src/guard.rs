//! Ownership, initialization and the pause switch.

use stylus_sdk::{
    alloy_primitives::{Address, U256},
    prelude::*,
};

use crate::errors::{
    AlreadyInitialized, EnforcedPause, EscrowError, ExpectedPause, InvalidOwner, NotOwner,
};
use crate::events::{Initialized, OwnershipTransferred, Paused, Unpaused};
use crate::migration::SCHEMA_VERSION;
use crate::NotificationEscrow;

impl NotificationEscrow {
    pub(crate) fn init_once(&mut self) -> Result<(), EscrowError> {
        if self.initialized.get() {
            return Err(EscrowError::AlreadyInitialized(AlreadyInitialized {}));
        }

        let caller = self.vm().msg_sender();
        self.initialized.set(true);
        self.schema_version.set(U256::from(SCHEMA_VERSION));
        self.hand_over(caller)?;

        log(
            self.vm(),
            Initialized {
                version: U256::from(SCHEMA_VERSION),
            },
        );
        Ok(())
    }

    /// Returns the caller when it holds the owner capability.
    pub(crate) fn only_owner(&self) -> Result<Address, EscrowError> {
        let caller = self.vm().msg_sender();
        let owner = self.owner.get();

        // an uninitialized contract has no owner at all
        if owner == Address::ZERO || caller != owner {
            return Err(EscrowError::NotOwner(NotOwner { caller }));
        }
        Ok(caller)
    }

    pub(crate) fn hand_over(&mut self, new_owner: Address) -> Result<(), EscrowError> {
        if new_owner == Address::ZERO {
            return Err(EscrowError::InvalidOwner(InvalidOwner { owner: new_owner }));
        }

        let previous_owner = self.owner.get();
        self.owner.set(new_owner);

        log(
            self.vm(),
            OwnershipTransferred {
                previousOwner: previous_owner,
                newOwner: new_owner,
            },
        );
        Ok(())
    }

    pub(crate) fn when_not_paused(&self) -> Result<(), EscrowError> {
        if self.paused.get() {
            return Err(EscrowError::EnforcedPause(EnforcedPause {}));
        }
        Ok(())
    }

    pub(crate) fn when_paused(&self) -> Result<(), EscrowError> {
        if !self.paused.get() {
            return Err(EscrowError::ExpectedPause(ExpectedPause {}));
        }
        Ok(())
    }

    pub(crate) fn set_paused(&mut self, account: Address, paused: bool) {
        self.paused.set(paused);

        if paused {
            log(self.vm(), Paused { account });
        } else {
            log(self.vm(), Unpaused { account });
        }
    }
}
