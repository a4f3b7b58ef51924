//! Messages exchanged between the page context and the background service.
//!
//! Requests are JSON objects tagged by `type`. Responses carry no tag on the
//! wire (`null`, a bool, a record...), so a response can only be decoded
//! knowing which request it answers; see [`Response::decode`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{CredentialRecord, PausedFeature, PendingCapture};

/// Request sent to the background service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Request {
    /// Find the saved login for a page.
    GetLogin { url: String },

    /// Whether a login for this site and username is already saved.
    CheckCredentialsExist { url: String, username: String },

    /// Persist a login, replacing an exact `(site, username)` match.
    SaveCredentials {
        url: String,
        username: String,
        password: String,
    },

    /// Stage a captured login until the next page asks for it.
    CacheTempCredentials {
        url: String,
        username: String,
        password: String,
    },

    /// Take the staged login if it is fresh and belongs to this page's site.
    CheckPendingToSave { url: String },

    /// Whether a feature is paused for a hostname.
    IsFeaturePaused {
        feature: PausedFeature,
        hostname: String,
    },
}

impl Request {
    pub fn kind(&self) -> MessageKind {
        match self {
            Self::GetLogin { .. } => MessageKind::GetLogin,
            Self::CheckCredentialsExist { .. } => MessageKind::CheckCredentialsExist,
            Self::SaveCredentials { .. } => MessageKind::SaveCredentials,
            Self::CacheTempCredentials { .. } => MessageKind::CacheTempCredentials,
            Self::CheckPendingToSave { .. } => MessageKind::CheckPendingToSave,
            Self::IsFeaturePaused { .. } => MessageKind::IsFeaturePaused,
        }
    }
}

/// Discriminant of [`Request`], used as the dispatch table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MessageKind {
    GetLogin,
    CheckCredentialsExist,
    SaveCredentials,
    CacheTempCredentials,
    CheckPendingToSave,
    IsFeaturePaused,
}

impl MessageKind {
    pub const ALL: [MessageKind; 6] = [
        Self::GetLogin,
        Self::CheckCredentialsExist,
        Self::SaveCredentials,
        Self::CacheTempCredentials,
        Self::CheckPendingToSave,
        Self::IsFeaturePaused,
    ];

    /// Wire name, as found in the request's `type` field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetLogin => "GET_LOGIN",
            Self::CheckCredentialsExist => "CHECK_CREDENTIALS_EXIST",
            Self::SaveCredentials => "SAVE_CREDENTIALS",
            Self::CacheTempCredentials => "CACHE_TEMP_CREDENTIALS",
            Self::CheckPendingToSave => "CHECK_PENDING_TO_SAVE",
            Self::IsFeaturePaused => "IS_FEATURE_PAUSED",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Acknowledgement for [`Request::CacheTempCredentials`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheAck {
    pub status: String,
}

impl CacheAck {
    pub fn cached() -> Self {
        Self {
            status: "cached".to_string(),
        }
    }
}

/// Response from the background service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Login(Option<CredentialRecord>),
    Exists(bool),
    Saved(bool),
    Cached(CacheAck),
    Pending(Option<PendingCapture>),
    Paused(bool),
}

impl Response {
    /// Decode a wire response to a request of the given kind.
    pub fn decode(kind: MessageKind, value: serde_json::Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            MessageKind::GetLogin => Self::Login(serde_json::from_value(value)?),
            MessageKind::CheckCredentialsExist => Self::Exists(serde_json::from_value(value)?),
            MessageKind::SaveCredentials => Self::Saved(serde_json::from_value(value)?),
            MessageKind::CacheTempCredentials => Self::Cached(serde_json::from_value(value)?),
            MessageKind::CheckPendingToSave => Self::Pending(serde_json::from_value(value)?),
            MessageKind::IsFeaturePaused => Self::Paused(serde_json::from_value(value)?),
        })
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
