//! Provider directory: each provider's public endpoint.
//!
//! A provider counts as registered while its URL is non-empty. Records are
//! never removed, only overwritten.

use alloc::string::String;

use stylus_sdk::{alloy_primitives::Address, prelude::*};

use crate::errors::{EmptyUrl, EscrowError, ProviderNotRegistered};
use crate::events::ProviderRegistered;
use crate::NotificationEscrow;

impl NotificationEscrow {
    pub(crate) fn register(&mut self, url: String) -> Result<(), EscrowError> {
        self.when_not_paused()?;

        let provider = self.vm().msg_sender();
        self.require_whitelisted_provider(provider)?;

        if url.is_empty() {
            return Err(EscrowError::EmptyUrl(EmptyUrl {}));
        }

        self.provider_urls.setter(provider).set_str(&url);

        log(self.vm(), ProviderRegistered { provider, url });
        Ok(())
    }

    pub(crate) fn is_registered(&self, provider: Address) -> bool {
        !self.provider_urls.get(provider).get_string().is_empty()
    }

    pub(crate) fn require_registered(&self, provider: Address) -> Result<(), EscrowError> {
        if !self.is_registered(provider) {
            return Err(EscrowError::ProviderNotRegistered(ProviderNotRegistered {
                provider,
            }));
        }
        Ok(())
    }
}
