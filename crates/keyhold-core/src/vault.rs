//! Credential store over a key-value backend.
//!
//! The whole record list is kept as JSON text under one key and rewritten on
//! every change. There is no locking or versioning: two concurrent writers
//! race and the later write wins. The list is only serialized, never
//! encrypted.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use keyhold_protocols::{CredentialRecord, KeyValueStore, StoreError};

use crate::csv::{self, CsvColumns, CSV_HEADER};
use crate::domain::{hosts_match, site_host, url_host, url_host_or_raw};
use crate::error::VaultError;

/// Storage key holding the serialized record list.
pub const VAULT_KEY: &str = "vault";

/// Passwords shorter than this are reported as weak.
pub const WEAK_PASSWORD_LEN: usize = 8;

/// Reads and writes the credential list.
#[derive(Clone)]
pub struct VaultService {
    store: Arc<dyn KeyValueStore>,
}

impl VaultService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// All records in storage order.
    ///
    /// A payload that does not decode is logged and read as an empty list.
    pub async fn get_all(&self) -> Result<Vec<CredentialRecord>, StoreError> {
        let Some(stored) = self.store.get(VAULT_KEY).await? else {
            return Ok(Vec::new());
        };

        let decoded = match stored {
            serde_json::Value::String(text) => serde_json::from_str(&text),
            serde_json::Value::Null => return Ok(Vec::new()),
            other => serde_json::from_value(other),
        };

        match decoded {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!("Vault payload is corrupted, reading as empty: {}", e);
                Ok(Vec::new())
            }
        }
    }

    pub async fn list(&self) -> Result<Vec<CredentialRecord>, StoreError> {
        self.get_all().await
    }

    /// Replace the whole list.
    pub async fn save_all(&self, records: &[CredentialRecord]) -> Result<(), StoreError> {
        let text = serde_json::to_string(records)?;
        self.store
            .set(VAULT_KEY, serde_json::Value::String(text))
            .await?;
        debug!("Vault rewritten with {} records", records.len());
        Ok(())
    }

    /// First record whose site matches the page's host, in storage order.
    pub async fn find_login_match(
        &self,
        url: &str,
    ) -> Result<Option<CredentialRecord>, StoreError> {
        let Some(host) = url_host(url) else {
            return Ok(None);
        };
        let records = self.get_all().await?;
        Ok(records.into_iter().find(|record| {
            !record.site.is_empty() && hosts_match(&host, &site_host(&record.site))
        }))
    }

    /// Whether a record for this site and exact username is saved.
    pub async fn credentials_exist(&self, url: &str, username: &str) -> Result<bool, StoreError> {
        let host = url_host_or_raw(url);
        let records = self.get_all().await?;
        Ok(records.iter().any(|record| {
            !record.site.is_empty()
                && !record.username.is_empty()
                && record.username == username
                && hosts_match(&host, &site_host(&record.site))
        }))
    }

    /// Save a login for the page at `url`, replacing an exact
    /// `(site, username)` match.
    pub async fn save_credentials(
        &self,
        url: &str,
        username: &str,
        password: &str,
    ) -> Result<CredentialRecord, StoreError> {
        let site = url_host_or_raw(url);
        let mut records = self.get_all().await?;

        let before = records.len();
        // Drops every exact match, not only the first.
        records.retain(|record| !record.is_exact(&site, username));
        if records.len() != before {
            debug!("Replacing saved login for {} on {}", username, site);
        }

        let record = CredentialRecord::new(site, username, password);
        records.push(record.clone());
        self.save_all(&records).await?;
        info!("Saved login for {} on {}", record.username, record.site);
        Ok(record)
    }

    /// Records whose site or username contains `term` (case-insensitive),
    /// optionally only those with weak passwords.
    pub async fn filter(
        &self,
        term: &str,
        weak_only: bool,
    ) -> Result<Vec<CredentialRecord>, StoreError> {
        let term = term.trim().to_lowercase();
        let records = self.get_all().await?;
        Ok(records
            .into_iter()
            .filter(|record| {
                let matches_text = record.site.to_lowercase().contains(&term)
                    || record.username.to_lowercase().contains(&term);
                let matches_kind = !weak_only || is_weak(&record.password);
                matches_text && matches_kind
            })
            .collect())
    }

    /// Add a record entered by hand.
    pub async fn add(
        &self,
        site: &str,
        username: &str,
        password: &str,
    ) -> Result<CredentialRecord, VaultError> {
        let (site, username, password) = required_fields(site, username, password)?;
        let mut records = self.get_all().await?;
        let record = CredentialRecord::new(site, username, password);
        records.push(record.clone());
        self.save_all(&records).await?;
        Ok(record)
    }

    /// Replace the fields of the record with this id.
    pub async fn update(
        &self,
        id: &str,
        site: &str,
        username: &str,
        password: &str,
    ) -> Result<CredentialRecord, VaultError> {
        let (site, username, password) = required_fields(site, username, password)?;
        let mut records = self.get_all().await?;
        let record = records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| VaultError::NotFound(id.to_string()))?;

        record.site = site;
        record.username = username;
        record.password = password;
        let updated = record.clone();

        self.save_all(&records).await?;
        Ok(updated)
    }

    /// Delete the record with this id.
    pub async fn remove(&self, id: &str) -> Result<CredentialRecord, VaultError> {
        let mut records = self.get_all().await?;
        let index = records
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| VaultError::NotFound(id.to_string()))?;

        let removed = records.remove(index);
        self.save_all(&records).await?;
        info!("Removed login {} for {}", removed.id, removed.site);
        Ok(removed)
    }

    /// Export every record as `site,username,password` CSV.
    pub async fn export_csv(&self) -> Result<String, StoreError> {
        let records = self.get_all().await?;
        let rows = std::iter::once(CSV_HEADER.to_vec()).chain(records.iter().map(|record| {
            vec![
                record.site.as_str(),
                record.username.as_str(),
                record.password.as_str(),
            ]
        }));
        Ok(csv::write_rows(rows))
    }

    /// Merge CSV rows into the vault, skipping rows without site or password
    /// and any `(site, username)` already present. Returns the number added.
    pub async fn import_csv(&self, text: &str) -> Result<usize, VaultError> {
        let mut records = csv::parse_records(text)?.into_iter();
        let header = records
            .next()
            .ok_or_else(|| VaultError::InvalidCsv("file is empty".to_string()))?;
        let columns = CsvColumns::from_header(&header)?;

        let mut current = self.get_all().await?;
        let mut seen: HashSet<String> = current
            .iter()
            .map(|record| merge_key(&record.site, &record.username))
            .collect();

        let mut imported = 0;
        for fields in records {
            let field = |index: usize| fields.get(index).cloned().unwrap_or_default();
            let (site, username, password) = (
                field(columns.site),
                field(columns.username),
                field(columns.password),
            );

            if site.is_empty() || password.is_empty() {
                continue;
            }
            if !seen.insert(merge_key(&site, &username)) {
                continue;
            }

            current.push(CredentialRecord::new(site, username, password));
            imported += 1;
        }

        if imported > 0 {
            self.save_all(&current).await?;
        }
        info!("Imported {} logins from CSV", imported);
        Ok(imported)
    }
}

/// Whether a password is short enough to be flagged.
pub fn is_weak(password: &str) -> bool {
    password.chars().count() < WEAK_PASSWORD_LEN
}

fn merge_key(site: &str, username: &str) -> String {
    format!(
        "{}|{}",
        site.trim().to_lowercase(),
        username.trim().to_lowercase()
    )
}

fn required_fields(
    site: &str,
    username: &str,
    password: &str,
) -> Result<(String, String, String), VaultError> {
    let site = site.trim();
    let password = password.trim();
    if site.is_empty() {
        return Err(VaultError::MissingField("site"));
    }
    if password.is_empty() {
        return Err(VaultError::MissingField("password"));
    }
    Ok((
        site.to_string(),
        username.trim().to_string(),
        password.to_string(),
    ))
}

#[cfg(test)]
#[path = "vault_tests.rs"]
mod tests;
