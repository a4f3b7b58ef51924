//! Field discovery over a page snapshot.
//!
//! Everything here is pure: the same snapshot always yields the same
//! fields. A missing element is `None`, never an error.

use crate::snapshot::{ButtonElement, ButtonTag, ElementId, FormId, InputElement, PageSnapshot};

/// Labels that identify a login button when nothing is typed as submit.
const LOGIN_LABELS: [&str; 5] = ["entrar", "acessar", "login", "sign in", "continuar"];

/// Form `action` fragments that identify a login form.
const LOGIN_ACTIONS: [&str; 3] = ["login", "signin", "entrar"];

/// A username/password pair read from the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialPair {
    pub username: String,
    pub password: String,
}

/// Inputs the autofill writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillTargets {
    pub username: Option<ElementId>,
    pub password: Option<ElementId>,
}

impl FillTargets {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

/// The non-hidden input right before `password` among `scope`'s inputs.
fn preceding_visible<'a>(
    snapshot: &'a PageSnapshot,
    scope: Option<FormId>,
    password: &InputElement,
) -> Option<&'a InputElement> {
    let visible: Vec<&InputElement> = snapshot
        .inputs_in(scope)
        .filter(|input| !input.is_hidden())
        .collect();
    let index = visible.iter().position(|input| input.id == password.id)?;
    index.checked_sub(1).map(|prev| visible[prev])
}

/// Read the credential pair a submission in `scope` would send.
///
/// Scope is a form, or the whole document for formless logins. Returns
/// `None` unless both a password and a username are found and non-empty.
pub fn extract_credentials(snapshot: &PageSnapshot, scope: Option<FormId>) -> Option<CredentialPair> {
    let password = snapshot.inputs_in(scope).find(|input| input.is_password())?;

    let username = snapshot
        .inputs_in(scope)
        .filter(|input| !input.is_hidden() && !input.is_password())
        .find(|input| input.looks_like_username() || input.is_email())
        .or_else(|| preceding_visible(snapshot, scope, password))?;

    if username.value.is_empty() || password.value.is_empty() {
        return None;
    }

    Some(CredentialPair {
        username: username.value.clone(),
        password: password.value.clone(),
    })
}

/// Where a saved login would be filled on this page.
pub fn fill_targets(snapshot: &PageSnapshot) -> FillTargets {
    let password = snapshot.inputs.iter().find(|input| input.is_password());

    let username = snapshot
        .inputs
        .iter()
        .filter(|input| !input.is_hidden() && !input.is_password())
        .find(|input| input.looks_like_username())
        .or_else(|| password.and_then(|pw| preceding_visible(snapshot, pw.form, pw)));

    FillTargets {
        username: username.map(|input| input.id),
        password: password.map(|input| input.id),
    }
}

/// Form to submit after filling.
///
/// The password field's form, else the username field's form, else a form
/// whose action looks like a login endpoint, else the first form.
pub fn login_form(snapshot: &PageSnapshot, targets: &FillTargets) -> Option<FormId> {
    let owner = |id: Option<ElementId>| id.and_then(|id| snapshot.input(id)).and_then(|i| i.form);

    owner(targets.password)
        .or_else(|| owner(targets.username))
        .or_else(|| {
            snapshot
                .forms
                .iter()
                .find(|form| {
                    let action = form.action.to_lowercase();
                    LOGIN_ACTIONS.iter().any(|hint| action.contains(hint))
                })
                .or_else(|| snapshot.forms.first())
                .map(|form| form.id)
        })
}

fn mentions_login(button: &ButtonElement) -> bool {
    button.tag == ButtonTag::Button
        && [
            &button.data_action,
            &button.data_testid,
            &button.name,
            &button.html_id,
        ]
        .iter()
        .any(|attr| attr.contains("login"))
}

/// Button to click when there is no form to submit.
pub fn submit_button(snapshot: &PageSnapshot) -> Option<ElementId> {
    snapshot
        .buttons
        .iter()
        .find(|button| button.is_submit() || mentions_login(button))
        .or_else(|| {
            snapshot
                .buttons
                .iter()
                .filter(|button| button.tag != ButtonTag::InputSubmit)
                .find(|button| {
                    let label = button.label.to_lowercase();
                    LOGIN_LABELS.iter().any(|word| label.contains(word))
                })
        })
        .map(|button| button.id)
}

#[cfg(test)]
#[path = "fields_tests.rs"]
mod tests;
