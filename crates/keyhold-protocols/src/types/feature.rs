//! Per-site pausable features.

use serde::{Deserialize, Serialize};

/// A page feature the user can pause for a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PausedFeature {
    /// Filling saved logins into forms. Pausing it disables the page context entirely.
    Autofill,
    /// Submitting the form after filling it.
    AutoLogin,
}

impl PausedFeature {
    /// Storage key holding the paused hostnames for this feature.
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Autofill => "autofillPausedSites",
            Self::AutoLogin => "autoLoginPausedSites",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Autofill => "autofill",
            Self::AutoLogin => "auto_login",
        }
    }

    pub fn from_name(value: &str) -> Option<Self> {
        match value {
            "autofill" => Some(Self::Autofill),
            "auto_login" | "auto-login" => Some(Self::AutoLogin),
            _ => None,
        }
    }
}
