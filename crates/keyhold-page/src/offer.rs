//! Offering to save the login staged by the previous page.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::client::BackgroundClient;

/// How long the save prompt stays up before dismissing itself.
pub const PROMPT_TIMEOUT: Duration = Duration::from_secs(15);

/// Answer to a save prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptDecision {
    Accept,
    Decline,
}

/// The save prompt UI.
#[async_trait]
pub trait SavePrompt: Send + Sync {
    /// Show the prompt for `username` and wait for an answer.
    async fn ask(&self, username: &str) -> PromptDecision;

    /// Remove the prompt after the timeout.
    fn dismiss(&self) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfferOutcome {
    NothingPending,
    AlreadySaved,
    Saved,
    Declined,
    TimedOut,
    Failed,
}

/// Runs once per page load, after autofill.
pub struct OfferCoordinator {
    client: Arc<dyn BackgroundClient>,
    prompt: Arc<dyn SavePrompt>,
    timeout: Duration,
}

impl OfferCoordinator {
    pub fn new(client: Arc<dyn BackgroundClient>, prompt: Arc<dyn SavePrompt>) -> Self {
        Self {
            client,
            prompt,
            timeout: PROMPT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Claim the staged login for `current_url` and offer to save it.
    ///
    /// Declining or letting the prompt time out discards the login.
    pub async fn run(&self, current_url: &str) -> OfferOutcome {
        let pending = match self.client.check_pending_to_save(current_url).await {
            Ok(Some(pending)) => pending,
            Ok(None) => return OfferOutcome::NothingPending,
            Err(e) => {
                warn!("Pending check failed: {}", e);
                return OfferOutcome::Failed;
            }
        };

        // Another tab may have saved it since it was staged.
        match self
            .client
            .credentials_exist(&pending.url, &pending.username)
            .await
        {
            Ok(false) => {}
            Ok(true) => return OfferOutcome::AlreadySaved,
            Err(e) => {
                warn!("Duplicate check failed: {}", e);
                return OfferOutcome::Failed;
            }
        }

        let decision = match tokio::time::timeout(self.timeout, self.prompt.ask(&pending.username))
            .await
        {
            Ok(decision) => decision,
            Err(_) => {
                debug!("Save prompt for {} timed out", pending.username);
                self.prompt.dismiss();
                return OfferOutcome::TimedOut;
            }
        };

        if decision == PromptDecision::Decline {
            return OfferOutcome::Declined;
        }

        match self
            .client
            .save_credentials(current_url, &pending.username, &pending.password)
            .await
        {
            Ok(_) => {
                info!("Saved login for {}", pending.username);
                OfferOutcome::Saved
            }
            Err(e) => {
                warn!("Save failed: {}", e);
                OfferOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use keyhold_protocols::{ClientError, PendingCapture, Request, Response};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct Scripted {
        pending: Mutex<Option<PendingCapture>>,
        exists: bool,
        saved: Mutex<Vec<Request>>,
    }

    impl Scripted {
        fn with_pending(exists: bool) -> Arc<Self> {
            Arc::new(Self {
                pending: Mutex::new(Some(PendingCapture {
                    url: "https://univille.br/login".to_string(),
                    username: "alice".to_string(),
                    password: "secret1".to_string(),
                    timestamp: Utc::now(),
                })),
                exists,
                saved: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl BackgroundClient for Scripted {
        async fn send(&self, request: Request) -> Result<Response, ClientError> {
            Ok(match request {
                Request::CheckPendingToSave { .. } => Response::Pending(self.pending.lock().take()),
                Request::CheckCredentialsExist { .. } => Response::Exists(self.exists),
                save @ Request::SaveCredentials { .. } => {
                    self.saved.lock().push(save);
                    Response::Saved(true)
                }
                _ => return Err(ClientError::SendFailed("unexpected".to_string())),
            })
        }
    }

    struct Answer(PromptDecision);

    #[async_trait]
    impl SavePrompt for Answer {
        async fn ask(&self, _username: &str) -> PromptDecision {
            self.0
        }
    }

    #[derive(Default)]
    struct Ignored {
        dismissed: AtomicBool,
    }

    #[async_trait]
    impl SavePrompt for Ignored {
        async fn ask(&self, _username: &str) -> PromptDecision {
            std::future::pending().await
        }

        fn dismiss(&self) {
            self.dismissed.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_accept_saves_under_current_url() {
        let client = Scripted::with_pending(false);
        let offer = OfferCoordinator::new(client.clone(), Arc::new(Answer(PromptDecision::Accept)));

        assert_eq!(offer.run("https://univille.br/portal").await, OfferOutcome::Saved);
        assert_eq!(
            client.saved.lock()[0],
            Request::SaveCredentials {
                url: "https://univille.br/portal".to_string(),
                username: "alice".to_string(),
                password: "secret1".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_decline_discards() {
        let client = Scripted::with_pending(false);
        let offer = OfferCoordinator::new(client.clone(), Arc::new(Answer(PromptDecision::Decline)));

        assert_eq!(offer.run("https://univille.br/portal").await, OfferOutcome::Declined);
        assert!(client.saved.lock().is_empty());
        assert_eq!(
            offer.run("https://univille.br/portal").await,
            OfferOutcome::NothingPending
        );
    }

    #[tokio::test]
    async fn test_duplicate_not_prompted() {
        let client = Scripted::with_pending(true);
        let offer = OfferCoordinator::new(client.clone(), Arc::new(Answer(PromptDecision::Accept)));
        assert_eq!(offer.run("https://univille.br/").await, OfferOutcome::AlreadySaved);
        assert!(client.saved.lock().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_prompt_times_out() {
        let client = Scripted::with_pending(false);
        let prompt = Arc::new(Ignored::default());
        let offer = OfferCoordinator::new(client.clone(), prompt.clone());

        assert_eq!(offer.run("https://univille.br/").await, OfferOutcome::TimedOut);
        assert!(prompt.dismissed.load(Ordering::SeqCst));
        assert!(client.saved.lock().is_empty());
    }
}
