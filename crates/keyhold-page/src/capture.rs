//! Login capture on form submission.
//!
//! Extraction runs synchronously on the snapshot taken at the event, before
//! the page can unload. Only then are messages sent. Capture never prompts:
//! it stages the login for the next page to offer.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::client::BackgroundClient;
use crate::fields::{extract_credentials, CredentialPair};
use crate::snapshot::{ElementId, FormId, PageSnapshot};

/// Event that may carry a login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionTrigger {
    /// A form's submit event, observed in the capture phase.
    FormSubmit(FormId),
    /// Click on a button or submit input.
    ButtonClick(ElementId),
    /// Enter pressed in a password field.
    EnterKey(ElementId),
}

impl SubmissionTrigger {
    /// Trigger for a key pressed in a password field, if it submits.
    pub fn from_key(key: &str, input: ElementId) -> Option<Self> {
        (key == "Enter").then_some(Self::EnterKey(input))
    }

    /// Form whose fields the submission sends; `None` means the document.
    pub fn scope(&self, snapshot: &PageSnapshot) -> Option<FormId> {
        match *self {
            Self::FormSubmit(form) => Some(form),
            Self::ButtonClick(button) => snapshot.button(button).and_then(|b| b.form),
            Self::EnterKey(input) => snapshot.input(input).and_then(|i| i.form),
        }
    }
}

/// Result of handling a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// No usable username/password pair.
    NoCredentials,
    /// This login is already saved.
    AlreadySaved,
    /// Handed to the background for the next page.
    Staged,
    /// A message failed; nothing was staged.
    Failed,
}

/// Watches submissions and stages new logins.
pub struct CaptureDetector {
    client: Arc<dyn BackgroundClient>,
}

impl CaptureDetector {
    pub fn new(client: Arc<dyn BackgroundClient>) -> Self {
        Self { client }
    }

    /// Credentials the submission would send. Pure over the snapshot.
    pub fn extract(snapshot: &PageSnapshot, trigger: SubmissionTrigger) -> Option<CredentialPair> {
        extract_credentials(snapshot, trigger.scope(snapshot))
    }

    /// Stage the login submitted on `page_url` unless it is already saved.
    pub async fn stage(&self, page_url: &str, pair: CredentialPair) -> CaptureOutcome {
        match self.client.credentials_exist(page_url, &pair.username).await {
            Ok(true) => {
                debug!("Login for {} already saved, not staging", pair.username);
                return CaptureOutcome::AlreadySaved;
            }
            Ok(false) => {}
            Err(e) => {
                warn!("Duplicate check failed, dropping capture: {}", e);
                return CaptureOutcome::Failed;
            }
        }

        match self
            .client
            .cache_temp_credentials(page_url, &pair.username, &pair.password)
            .await
        {
            Ok(()) => {
                debug!("Staged login for {} from {}", pair.username, page_url);
                CaptureOutcome::Staged
            }
            Err(e) => {
                warn!("Could not stage capture: {}", e);
                CaptureOutcome::Failed
            }
        }
    }

    /// Extract then stage.
    pub async fn on_submission(
        &self,
        snapshot: &PageSnapshot,
        trigger: SubmissionTrigger,
    ) -> CaptureOutcome {
        let Some(pair) = Self::extract(snapshot, trigger) else {
            return CaptureOutcome::NoCredentials;
        };
        self.stage(&snapshot.url, pair).await
    }
}
