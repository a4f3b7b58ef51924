//! Stored credential record.

use serde::{Deserialize, Serialize};

/// A saved login.
///
/// `site` is whatever the record was saved with: a bare hostname for
/// captured logins, or a raw URL when entered by hand. Identity is `id`;
/// `(site, username)` is not a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    pub id: String,
    #[serde(default)]
    pub site: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl CredentialRecord {
    /// Create a record with a freshly generated id.
    pub fn new(
        site: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            site: site.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Whether this record was saved for exactly this site and username.
    pub fn is_exact(&self, site: &str, username: &str) -> bool {
        self.site == site && self.username == username
    }
}
