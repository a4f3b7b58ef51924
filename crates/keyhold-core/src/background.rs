//! The background service: one per browser profile.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use keyhold_protocols::{Clock, DispatchError, KeyValueStore, Request, Response};

use crate::dispatch::{
    CacheTempCredentialsHandler, CheckCredentialsExistHandler, CheckPendingToSaveHandler,
    Dispatcher, GetLoginHandler, IsFeaturePausedHandler, SaveCredentialsHandler,
};
use crate::paused::PausedSites;
use crate::pending::PendingCredentialCache;
use crate::vault::VaultService;

/// Owns the vault, the pause lists and the pending-capture slot, and
/// answers page requests through the dispatch table.
pub struct BackgroundService {
    vault: VaultService,
    paused: PausedSites,
    pending: Arc<PendingCredentialCache>,
    dispatcher: Dispatcher,
}

impl BackgroundService {
    /// Build the service with every default handler registered.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        pending_ttl: Duration,
    ) -> Result<Self, DispatchError> {
        let vault = VaultService::new(store.clone());
        let paused = PausedSites::new(store.clone());
        let pending = Arc::new(PendingCredentialCache::new(clock, pending_ttl));

        let dispatcher = Dispatcher::new();
        dispatcher.register(Arc::new(GetLoginHandler::new(vault.clone())))?;
        dispatcher.register(Arc::new(CheckCredentialsExistHandler::new(vault.clone())))?;
        dispatcher.register(Arc::new(SaveCredentialsHandler::new(vault.clone())))?;
        dispatcher.register(Arc::new(CacheTempCredentialsHandler::new(pending.clone())))?;
        dispatcher.register(Arc::new(CheckPendingToSaveHandler::new(pending.clone())))?;
        dispatcher.register(Arc::new(IsFeaturePausedHandler::new(paused.clone())))?;

        info!(
            "Background service ready on store '{}' (pending TTL {}s)",
            store.id(),
            pending_ttl.as_secs()
        );

        Ok(Self {
            vault,
            paused,
            pending,
            dispatcher,
        })
    }

    pub async fn handle(&self, request: Request) -> Result<Response, DispatchError> {
        self.dispatcher.dispatch(request).await
    }

    pub fn vault(&self) -> &VaultService {
        &self.vault
    }

    pub fn paused(&self) -> &PausedSites {
        &self.paused
    }

    pub fn pending(&self) -> &PendingCredentialCache {
        &self.pending
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}
