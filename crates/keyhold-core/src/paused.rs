//! Per-site pause lists for autofill and auto-login.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{info, warn};

use keyhold_protocols::{KeyValueStore, PausedFeature, StoreError};

use crate::domain::{is_same_or_subdomain, normalize_domain};

/// Hostname sets, one storage key per feature.
#[derive(Clone)]
pub struct PausedSites {
    store: Arc<dyn KeyValueStore>,
}

impl PausedSites {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Saved hostnames for a feature, sorted.
    pub async fn list(&self, feature: PausedFeature) -> Result<Vec<String>, StoreError> {
        Ok(self.load(feature).await?.into_iter().collect())
    }

    /// Whether `hostname` or one of its parent domains is paused.
    ///
    /// A store failure reads as "not paused".
    pub async fn is_paused(&self, feature: PausedFeature, hostname: &str) -> bool {
        match self.load(feature).await {
            Ok(sites) => sites
                .iter()
                .any(|saved| is_same_or_subdomain(hostname, saved)),
            Err(e) => {
                warn!("Could not read {} pause list: {}", feature.as_str(), e);
                false
            }
        }
    }

    /// Add or remove a hostname. Returns whether the list changed.
    pub async fn set_paused(
        &self,
        feature: PausedFeature,
        hostname: &str,
        paused: bool,
    ) -> Result<bool, StoreError> {
        let host = normalize_domain(hostname);
        if host.is_empty() {
            return Ok(false);
        }

        let mut sites = self.load(feature).await?;
        let changed = if paused {
            sites.insert(host.clone())
        } else {
            sites.remove(&host)
        };

        if changed {
            let value = serde_json::to_value(&sites)?;
            self.store.set(feature.storage_key(), value).await?;
            info!(
                "{} {} for {}",
                if paused { "Paused" } else { "Resumed" },
                feature.as_str(),
                host
            );
        }
        Ok(changed)
    }

    async fn load(&self, feature: PausedFeature) -> Result<BTreeSet<String>, StoreError> {
        let Some(value) = self.store.get(feature.storage_key()).await? else {
            return Ok(BTreeSet::new());
        };
        match serde_json::from_value::<Vec<String>>(value) {
            Ok(sites) => Ok(sites.iter().map(|s| normalize_domain(s)).collect()),
            Err(e) => {
                warn!("Ignoring malformed {} pause list: {}", feature.as_str(), e);
                Ok(BTreeSet::new())
            }
        }
    }
}
