//! Storage schema versioning for in-place upgrades.
//!
//! v1 deployments wrote `initialized`, `owner`, `paused`, the whitelists, the
//! provider directory and the subscription table. v2 appends
//! `schema_version` and the per-asset `escrow_totals`. A v1 contract upgraded
//! to this code reads as version 1 until the owner runs `migrate`, which seeds
//! the totals and stamps the new version. Money-moving entry points stay
//! closed in between.

use stylus_sdk::{
    alloy_primitives::{Address, U256},
    prelude::*,
};

use crate::errors::{EscrowError, MigrationMismatch, SchemaOutdated, SchemaUpToDate};
use crate::events::SchemaMigrated;
use crate::NotificationEscrow;

/// Layout version written by this code.
pub const SCHEMA_VERSION: u64 = 2;

impl NotificationEscrow {
    /// 0 = never initialized, 1 = v1 layout (no version slot yet).
    pub(crate) fn stored_schema_version(&self) -> U256 {
        if !self.initialized.get() {
            return U256::ZERO;
        }

        let version = self.schema_version.get();
        if version.is_zero() {
            U256::from(1)
        } else {
            version
        }
    }

    pub(crate) fn require_current_schema(&self) -> Result<(), EscrowError> {
        let version = self.stored_schema_version();
        if version < U256::from(SCHEMA_VERSION) {
            return Err(EscrowError::SchemaOutdated(SchemaOutdated { version }));
        }
        Ok(())
    }

    pub(crate) fn upgrade_schema(&mut self, tokens: &[Address], totals: &[U256]) -> Result<(), EscrowError> {
        let from = self.stored_schema_version();
        let to = U256::from(SCHEMA_VERSION);

        if from >= to {
            return Err(EscrowError::SchemaUpToDate(SchemaUpToDate { version: from }));
        }

        if tokens.len() != totals.len() {
            return Err(EscrowError::MigrationMismatch(MigrationMismatch {
                tokens: U256::from(tokens.len()),
                totals: U256::from(totals.len()),
            }));
        }

        for (token, total) in tokens.iter().zip(totals) {
            self.escrow_totals.insert(*token, *total);
        }
        self.schema_version.set(to);

        log(
            self.vm(),
            SchemaMigrated {
                fromVersion: from,
                toVersion: to,
            },
        );
        Ok(())
    }
}
