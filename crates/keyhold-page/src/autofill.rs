//! Filling a saved login into the page, and auto-login.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use keyhold_protocols::CredentialRecord;

use crate::fields::{fill_targets, login_form, submit_button, FillTargets};
use crate::snapshot::{ElementId, FormId, PageSnapshot};

/// Delay between filling and auto-submitting.
pub const AUTO_LOGIN_DELAY: Duration = Duration::from_millis(250);

/// DOM operations the page glue performs.
pub trait PageDriver: Send + Sync {
    /// Set an input's value and fire `input`, `change` and `blur`.
    fn fill(&self, input: ElementId, value: &str);

    fn submit_form(&self, form: FormId);

    fn click(&self, button: ElementId);
}

/// How the login is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAction {
    Form(FormId),
    Button(ElementId),
}

impl SubmitAction {
    pub fn perform(self, driver: &dyn PageDriver) {
        match self {
            Self::Form(form) => driver.submit_form(form),
            Self::Button(button) => driver.click(button),
        }
    }
}

/// What to write where, and whether to submit afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FillPlan {
    pub fills: Vec<(ElementId, String)>,
    pub submit: Option<SubmitAction>,
}

impl FillPlan {
    pub fn is_empty(&self) -> bool {
        self.fills.is_empty()
    }

    /// Write the planned values.
    pub fn apply(&self, driver: &dyn PageDriver) {
        for (input, value) in &self.fills {
            driver.fill(*input, value);
        }
    }
}

/// Plan the fill of `record` into the page.
///
/// Fields with an empty value are left alone. A submit action is planned
/// only when `auto_submit` holds, there is something to fill and a target
/// field exists; the form is preferred over a button.
pub fn plan_fill(snapshot: &PageSnapshot, record: &CredentialRecord, auto_submit: bool) -> FillPlan {
    let targets = fill_targets(snapshot);

    let mut fills = Vec::new();
    if let Some(password) = targets.password.filter(|_| !record.password.is_empty()) {
        fills.push((password, record.password.clone()));
    }
    if let Some(username) = targets.username.filter(|_| !record.username.is_empty()) {
        fills.push((username, record.username.clone()));
    }

    let has_data = !record.username.is_empty() || !record.password.is_empty();
    let submit = if auto_submit && has_data && !targets.is_empty() {
        submit_action(snapshot, &targets)
    } else {
        None
    };

    FillPlan { fills, submit }
}

fn submit_action(snapshot: &PageSnapshot, targets: &FillTargets) -> Option<SubmitAction> {
    login_form(snapshot, targets)
        .map(SubmitAction::Form)
        .or_else(|| submit_button(snapshot).map(SubmitAction::Button))
}

/// Fires the auto-login at most once per page.
pub struct AutoLoginScheduler {
    delay: Duration,
    triggered: AtomicBool,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl AutoLoginScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            triggered: AtomicBool::new(false),
            pending: Mutex::new(None),
        }
    }

    /// Perform `action` after the delay. Returns `false` if an auto-login
    /// was already scheduled on this page.
    pub fn schedule(&self, driver: Arc<dyn PageDriver>, action: SubmitAction) -> bool {
        if self.triggered.swap(true, Ordering::SeqCst) {
            debug!("Auto-login already triggered on this page");
            return false;
        }

        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            debug!("Auto-login: {:?}", action);
            action.perform(driver.as_ref());
        });
        *self.pending.lock() = Some(handle);
        true
    }

    pub fn has_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    /// Abort a scheduled auto-login that has not fired yet.
    pub fn cancel(&self) {
        if let Some(handle) = self.pending.lock().take() {
            handle.abort();
        }
    }

    /// Wait for the scheduled auto-login to finish.
    pub async fn wait(&self) {
        let handle = self.pending.lock().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}

impl Default for AutoLoginScheduler {
    fn default() -> Self {
        Self::new(AUTO_LOGIN_DELAY)
    }
}

#[cfg(test)]
#[path = "autofill_tests.rs"]
mod tests;
