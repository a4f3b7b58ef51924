//! Default handlers, one per message kind.

use std::sync::Arc;

use async_trait::async_trait;

use keyhold_protocols::{CacheAck, DispatchError, MessageKind, Request, Response};

use super::MessageHandler;
use crate::paused::PausedSites;
use crate::pending::PendingCredentialCache;
use crate::vault::VaultService;

fn wrong_kind(expected: MessageKind, request: &Request) -> DispatchError {
    DispatchError::WrongKind {
        expected,
        actual: request.kind(),
    }
}

/// `GET_LOGIN`: first saved record matching the page.
pub struct GetLoginHandler {
    vault: VaultService,
}

impl GetLoginHandler {
    pub fn new(vault: VaultService) -> Self {
        Self { vault }
    }
}

#[async_trait]
impl MessageHandler for GetLoginHandler {
    fn kind(&self) -> MessageKind {
        MessageKind::GetLogin
    }

    async fn handle(&self, request: Request) -> Result<Response, DispatchError> {
        match request {
            Request::GetLogin { url } => {
                Ok(Response::Login(self.vault.find_login_match(&url).await?))
            }
            other => Err(wrong_kind(self.kind(), &other)),
        }
    }
}

/// `CHECK_CREDENTIALS_EXIST`
pub struct CheckCredentialsExistHandler {
    vault: VaultService,
}

impl CheckCredentialsExistHandler {
    pub fn new(vault: VaultService) -> Self {
        Self { vault }
    }
}

#[async_trait]
impl MessageHandler for CheckCredentialsExistHandler {
    fn kind(&self) -> MessageKind {
        MessageKind::CheckCredentialsExist
    }

    async fn handle(&self, request: Request) -> Result<Response, DispatchError> {
        match request {
            Request::CheckCredentialsExist { url, username } => Ok(Response::Exists(
                self.vault.credentials_exist(&url, &username).await?,
            )),
            other => Err(wrong_kind(self.kind(), &other)),
        }
    }
}

/// `SAVE_CREDENTIALS`: always answers `true` once written.
pub struct SaveCredentialsHandler {
    vault: VaultService,
}

impl SaveCredentialsHandler {
    pub fn new(vault: VaultService) -> Self {
        Self { vault }
    }
}

#[async_trait]
impl MessageHandler for SaveCredentialsHandler {
    fn kind(&self) -> MessageKind {
        MessageKind::SaveCredentials
    }

    async fn handle(&self, request: Request) -> Result<Response, DispatchError> {
        match request {
            Request::SaveCredentials {
                url,
                username,
                password,
            } => {
                self.vault
                    .save_credentials(&url, &username, &password)
                    .await?;
                Ok(Response::Saved(true))
            }
            other => Err(wrong_kind(self.kind(), &other)),
        }
    }
}

/// `CACHE_TEMP_CREDENTIALS`
pub struct CacheTempCredentialsHandler {
    pending: Arc<PendingCredentialCache>,
}

impl CacheTempCredentialsHandler {
    pub fn new(pending: Arc<PendingCredentialCache>) -> Self {
        Self { pending }
    }
}

#[async_trait]
impl MessageHandler for CacheTempCredentialsHandler {
    fn kind(&self) -> MessageKind {
        MessageKind::CacheTempCredentials
    }

    async fn handle(&self, request: Request) -> Result<Response, DispatchError> {
        match request {
            Request::CacheTempCredentials {
                url,
                username,
                password,
            } => {
                self.pending.cache(&url, &username, &password);
                Ok(Response::Cached(CacheAck::cached()))
            }
            other => Err(wrong_kind(self.kind(), &other)),
        }
    }
}

/// `CHECK_PENDING_TO_SAVE`: hands the staged capture out at most once.
pub struct CheckPendingToSaveHandler {
    pending: Arc<PendingCredentialCache>,
}

impl CheckPendingToSaveHandler {
    pub fn new(pending: Arc<PendingCredentialCache>) -> Self {
        Self { pending }
    }
}

#[async_trait]
impl MessageHandler for CheckPendingToSaveHandler {
    fn kind(&self) -> MessageKind {
        MessageKind::CheckPendingToSave
    }

    async fn handle(&self, request: Request) -> Result<Response, DispatchError> {
        match request {
            Request::CheckPendingToSave { url } => {
                Ok(Response::Pending(self.pending.take_if_fresh(&url)))
            }
            other => Err(wrong_kind(self.kind(), &other)),
        }
    }
}

/// `IS_FEATURE_PAUSED`
pub struct IsFeaturePausedHandler {
    paused: PausedSites,
}

impl IsFeaturePausedHandler {
    pub fn new(paused: PausedSites) -> Self {
        Self { paused }
    }
}

#[async_trait]
impl MessageHandler for IsFeaturePausedHandler {
    fn kind(&self) -> MessageKind {
        MessageKind::IsFeaturePaused
    }

    async fn handle(&self, request: Request) -> Result<Response, DispatchError> {
        match request {
            Request::IsFeaturePaused { feature, hostname } => Ok(Response::Paused(
                self.paused.is_paused(feature, &hostname).await,
            )),
            other => Err(wrong_kind(self.kind(), &other)),
        }
    }
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
