//! Per-tab page context.
//!
//! On load: check the pause lists, fill a saved login, then offer to save
//! whatever the previous page staged. Afterwards, submissions are captured.
//! Nothing here ever surfaces an error to the page.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use keyhold_core::domain::url_host;
use keyhold_protocols::PausedFeature;

use crate::autofill::{plan_fill, AutoLoginScheduler, PageDriver, AUTO_LOGIN_DELAY};
use crate::capture::{CaptureDetector, CaptureOutcome, SubmissionTrigger};
use crate::client::BackgroundClient;
use crate::offer::{OfferCoordinator, OfferOutcome, SavePrompt, PROMPT_TIMEOUT};
use crate::snapshot::PageSnapshot;

/// What page initialization did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageInit {
    /// Autofill is paused for this site; the page context stays inert.
    Disabled,
    Ready {
        filled: bool,
        auto_login_scheduled: bool,
        offer: OfferOutcome,
    },
}

/// Timings of a page session.
#[derive(Debug, Clone, Copy)]
pub struct PageTimings {
    pub auto_login_delay: Duration,
    pub prompt_timeout: Duration,
}

impl Default for PageTimings {
    fn default() -> Self {
        Self {
            auto_login_delay: AUTO_LOGIN_DELAY,
            prompt_timeout: PROMPT_TIMEOUT,
        }
    }
}

pub struct PageSession {
    client: Arc<dyn BackgroundClient>,
    driver: Arc<dyn PageDriver>,
    capture: CaptureDetector,
    offer: OfferCoordinator,
    auto_login: AutoLoginScheduler,
    active: AtomicBool,
}

impl PageSession {
    pub fn new(
        client: Arc<dyn BackgroundClient>,
        driver: Arc<dyn PageDriver>,
        prompt: Arc<dyn SavePrompt>,
    ) -> Self {
        Self::with_timings(client, driver, prompt, PageTimings::default())
    }

    pub fn with_timings(
        client: Arc<dyn BackgroundClient>,
        driver: Arc<dyn PageDriver>,
        prompt: Arc<dyn SavePrompt>,
        timings: PageTimings,
    ) -> Self {
        Self {
            capture: CaptureDetector::new(client.clone()),
            offer: OfferCoordinator::new(client.clone(), prompt)
                .with_timeout(timings.prompt_timeout),
            auto_login: AutoLoginScheduler::new(timings.auto_login_delay),
            active: AtomicBool::new(false),
            client,
            driver,
        }
    }

    async fn is_paused(&self, feature: PausedFeature, hostname: &str) -> bool {
        match self.client.is_feature_paused(feature, hostname).await {
            Ok(paused) => paused,
            Err(e) => {
                debug!("Pause check for {} failed: {}", feature.as_str(), e);
                false
            }
        }
    }

    /// Run the page-load sequence on the initial snapshot.
    pub async fn init(&self, snapshot: &PageSnapshot) -> PageInit {
        let hostname = url_host(&snapshot.url).unwrap_or_default();

        if self.is_paused(PausedFeature::Autofill, &hostname).await {
            debug!("Autofill paused on {}", hostname);
            return PageInit::Disabled;
        }
        let auto_login_paused = self.is_paused(PausedFeature::AutoLogin, &hostname).await;
        self.active.store(true, Ordering::SeqCst);

        let mut filled = false;
        let mut auto_login_scheduled = false;
        match self.client.get_login(&snapshot.url).await {
            Ok(Some(record)) => {
                let plan = plan_fill(snapshot, &record, !auto_login_paused);
                plan.apply(self.driver.as_ref());
                filled = !plan.is_empty();
                if let Some(action) = plan.submit {
                    auto_login_scheduled = self.auto_login.schedule(self.driver.clone(), action);
                }
            }
            Ok(None) => {}
            Err(e) => warn!("Login lookup failed: {}", e),
        }

        let offer = self.offer.run(&snapshot.url).await;

        PageInit::Ready {
            filled,
            auto_login_scheduled,
            offer,
        }
    }

    /// Handle a submission event. Ignored while the session is inactive.
    pub async fn on_submission(
        &self,
        snapshot: &PageSnapshot,
        trigger: SubmissionTrigger,
    ) -> Option<CaptureOutcome> {
        if !self.active.load(Ordering::SeqCst) {
            return None;
        }
        Some(self.capture.on_submission(snapshot, trigger).await)
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn auto_login(&self) -> &AutoLoginScheduler {
        &self.auto_login
    }
}
