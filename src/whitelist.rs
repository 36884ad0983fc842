//! Allow-list checks shared by the directory and the ledger.

use stylus_sdk::alloy_primitives::Address;

use crate::errors::{EscrowError, ProviderNotWhitelisted, TokenNotWhitelisted};
use crate::NotificationEscrow;

impl NotificationEscrow {
    pub(crate) fn require_whitelisted_token(&self, token: Address) -> Result<(), EscrowError> {
        if !self.whitelisted_tokens.get(token) {
            return Err(EscrowError::TokenNotWhitelisted(TokenNotWhitelisted { token }));
        }
        Ok(())
    }

    pub(crate) fn require_whitelisted_provider(&self, provider: Address) -> Result<(), EscrowError> {
        if !self.whitelisted_providers.get(provider) {
            return Err(EscrowError::ProviderNotWhitelisted(ProviderNotWhitelisted {
                provider,
            }));
        }
        Ok(())
    }
}
