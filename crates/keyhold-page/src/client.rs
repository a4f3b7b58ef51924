//! Page-side access to the background service.

use std::sync::Arc;

use async_trait::async_trait;

use keyhold_core::BackgroundService;
use keyhold_protocols::{
    ClientError, CredentialRecord, MessageKind, PausedFeature, PendingCapture, Request, Response,
};

/// Message channel to the background context.
///
/// Implementors provide [`send`](Self::send); the typed helpers check that
/// the response matches the request.
#[async_trait]
pub trait BackgroundClient: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response, ClientError>;

    async fn get_login(&self, url: &str) -> Result<Option<CredentialRecord>, ClientError> {
        match self.send(Request::GetLogin { url: url.to_string() }).await? {
            Response::Login(record) => Ok(record),
            _ => Err(ClientError::UnexpectedResponse(MessageKind::GetLogin)),
        }
    }

    async fn credentials_exist(&self, url: &str, username: &str) -> Result<bool, ClientError> {
        let request = Request::CheckCredentialsExist {
            url: url.to_string(),
            username: username.to_string(),
        };
        match self.send(request).await? {
            Response::Exists(exists) => Ok(exists),
            _ => Err(ClientError::UnexpectedResponse(
                MessageKind::CheckCredentialsExist,
            )),
        }
    }

    async fn save_credentials(
        &self,
        url: &str,
        username: &str,
        password: &str,
    ) -> Result<bool, ClientError> {
        let request = Request::SaveCredentials {
            url: url.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        };
        match self.send(request).await? {
            Response::Saved(saved) => Ok(saved),
            _ => Err(ClientError::UnexpectedResponse(MessageKind::SaveCredentials)),
        }
    }

    async fn cache_temp_credentials(
        &self,
        url: &str,
        username: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        let request = Request::CacheTempCredentials {
            url: url.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        };
        match self.send(request).await? {
            Response::Cached(_) => Ok(()),
            _ => Err(ClientError::UnexpectedResponse(
                MessageKind::CacheTempCredentials,
            )),
        }
    }

    async fn check_pending_to_save(&self, url: &str) -> Result<Option<PendingCapture>, ClientError> {
        match self
            .send(Request::CheckPendingToSave { url: url.to_string() })
            .await?
        {
            Response::Pending(pending) => Ok(pending),
            _ => Err(ClientError::UnexpectedResponse(
                MessageKind::CheckPendingToSave,
            )),
        }
    }

    async fn is_feature_paused(
        &self,
        feature: PausedFeature,
        hostname: &str,
    ) -> Result<bool, ClientError> {
        let request = Request::IsFeaturePaused {
            feature,
            hostname: hostname.to_string(),
        };
        match self.send(request).await? {
            Response::Paused(paused) => Ok(paused),
            _ => Err(ClientError::UnexpectedResponse(MessageKind::IsFeaturePaused)),
        }
    }
}

/// Client calling a background service in the same process.
#[derive(Clone)]
pub struct LocalBackgroundClient {
    service: Arc<BackgroundService>,
}

impl LocalBackgroundClient {
    pub fn new(service: Arc<BackgroundService>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &BackgroundService {
        &self.service
    }
}

#[async_trait]
impl BackgroundClient for LocalBackgroundClient {
    async fn send(&self, request: Request) -> Result<Response, ClientError> {
        Ok(self.service.handle(request).await?)
    }
}
