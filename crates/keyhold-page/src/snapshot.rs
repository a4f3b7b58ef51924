//! Structural snapshot of a page's login-relevant elements.
//!
//! The glue walks the DOM at the moment of an event and records forms,
//! inputs and buttons in document order. Everything downstream is pure
//! over this snapshot.

use serde::{Deserialize, Serialize};

/// Handle of an input or button, assigned by the glue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ElementId(pub u32);

/// Handle of a form, assigned by the glue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormId(pub u32);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormElement {
    pub id: FormId,
    /// Raw `action` attribute.
    #[serde(default)]
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputElement {
    pub id: ElementId,
    /// Owning form, if any.
    pub form: Option<FormId>,
    /// `type` attribute, `text` when absent.
    #[serde(rename = "type")]
    pub input_type: String,
    pub name: String,
    pub autocomplete: String,
    pub value: String,
}

impl InputElement {
    pub fn kind(&self) -> &str {
        if self.input_type.is_empty() {
            "text"
        } else {
            &self.input_type
        }
    }

    pub fn is_password(&self) -> bool {
        self.kind().eq_ignore_ascii_case("password")
    }

    pub fn is_hidden(&self) -> bool {
        self.kind().eq_ignore_ascii_case("hidden")
    }

    pub fn is_email(&self) -> bool {
        self.kind().eq_ignore_ascii_case("email")
    }

    /// Name-based username hint: `autocomplete=username` or a name
    /// mentioning `user` or `login`.
    pub fn looks_like_username(&self) -> bool {
        self.autocomplete.eq_ignore_ascii_case("username")
            || self.name.contains("user")
            || self.name.contains("login")
    }
}

/// Tag of a clickable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonTag {
    /// `<button>`
    #[default]
    Button,
    /// `<input type=submit>`
    InputSubmit,
    /// `<input type=button>`
    InputButton,
    /// `<div role=button>`
    RoleButton,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonElement {
    pub id: ElementId,
    pub form: Option<FormId>,
    pub tag: ButtonTag,
    /// `type` attribute of a `<button>`.
    #[serde(rename = "type")]
    pub button_type: String,
    pub name: String,
    /// HTML `id` attribute.
    pub html_id: String,
    pub data_action: String,
    pub data_testid: String,
    /// Text content, or `value` for inputs.
    pub label: String,
}

impl ButtonElement {
    pub fn is_submit(&self) -> bool {
        match self.tag {
            ButtonTag::InputSubmit => true,
            ButtonTag::Button => self.button_type.eq_ignore_ascii_case("submit"),
            _ => false,
        }
    }
}

/// Login-relevant elements of a page, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSnapshot {
    /// Full URL of the page.
    pub url: String,
    pub forms: Vec<FormElement>,
    pub inputs: Vec<InputElement>,
    pub buttons: Vec<ButtonElement>,
}

impl PageSnapshot {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn input(&self, id: ElementId) -> Option<&InputElement> {
        self.inputs.iter().find(|input| input.id == id)
    }

    pub fn button(&self, id: ElementId) -> Option<&ButtonElement> {
        self.buttons.iter().find(|button| button.id == id)
    }

    pub fn form(&self, id: FormId) -> Option<&FormElement> {
        self.forms.iter().find(|form| form.id == id)
    }

    /// Inputs of one form, or of the whole document when `scope` is `None`.
    pub fn inputs_in(&self, scope: Option<FormId>) -> impl Iterator<Item = &InputElement> {
        self.inputs
            .iter()
            .filter(move |input| scope.is_none() || input.form == scope)
    }
}

/// Builder used by the glue and by tests to describe a page.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    snapshot: PageSnapshot,
    next_id: u32,
    current_form: Option<FormId>,
}

impl SnapshotBuilder {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            snapshot: PageSnapshot::new(url),
            ..Default::default()
        }
    }

    fn next(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    /// Open a form; elements added afterwards belong to it until
    /// [`end_form`](Self::end_form).
    pub fn form(mut self, action: &str) -> Self {
        let id = FormId(self.next());
        self.snapshot.forms.push(FormElement {
            id,
            action: action.to_string(),
        });
        self.current_form = Some(id);
        self
    }

    pub fn end_form(mut self) -> Self {
        self.current_form = None;
        self
    }

    pub fn input(mut self, input_type: &str, name: &str, value: &str) -> Self {
        let id = ElementId(self.next());
        self.snapshot.inputs.push(InputElement {
            id,
            form: self.current_form,
            input_type: input_type.to_string(),
            name: name.to_string(),
            autocomplete: String::new(),
            value: value.to_string(),
        });
        self
    }

    /// Set `autocomplete` on the last added input.
    pub fn autocomplete(mut self, value: &str) -> Self {
        if let Some(input) = self.snapshot.inputs.last_mut() {
            input.autocomplete = value.to_string();
        }
        self
    }

    pub fn button(self, tag: ButtonTag, button_type: &str, label: &str) -> Self {
        self.button_with(ButtonElement {
            tag,
            button_type: button_type.to_string(),
            label: label.to_string(),
            ..Default::default()
        })
    }

    /// Add a button; `id` and `form` are filled in.
    pub fn button_with(mut self, mut button: ButtonElement) -> Self {
        button.id = ElementId(self.next());
        button.form = self.current_form;
        self.snapshot.buttons.push(button);
        self
    }

    pub fn build(self) -> PageSnapshot {
        self.snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_assigns_forms() {
        let snapshot = SnapshotBuilder::new("https://univille.br/login")
            .input("text", "search", "")
            .form("/login")
            .input("text", "user", "alice")
            .input("password", "pass", "secret1")
            .build();

        assert_eq!(snapshot.forms.len(), 1);
        assert_eq!(snapshot.inputs[0].form, None);
        assert_eq!(snapshot.inputs[1].form, Some(snapshot.forms[0].id));
        assert_eq!(snapshot.inputs_in(Some(snapshot.forms[0].id)).count(), 2);
        assert_eq!(snapshot.inputs_in(None).count(), 3);
    }

    #[test]
    fn test_input_kinds() {
        let input = InputElement {
            input_type: "PASSWORD".to_string(),
            ..Default::default()
        };
        assert!(input.is_password());

        let untyped = InputElement::default();
        assert_eq!(untyped.kind(), "text");
        assert!(!untyped.is_hidden());
    }

    #[test]
    fn test_snapshot_from_json() {
        let json = r#"{
            "url": "https://univille.br/login",
            "forms": [{"id": 1, "action": "/auth/login"}],
            "inputs": [
                {"id": 2, "form": 1, "type": "email", "value": "alice@univille.br"},
                {"id": 3, "form": 1, "type": "password", "value": "secret1"}
            ],
            "buttons": [{"id": 4, "form": 1, "tag": "button", "type": "submit", "label": "Entrar"}]
        }"#;
        let snapshot: PageSnapshot = serde_json::from_str(json).unwrap();
        assert!(snapshot.input(ElementId(2)).unwrap().is_email());
        assert!(snapshot.button(ElementId(4)).unwrap().is_submit());
        assert_eq!(snapshot.form(FormId(1)).unwrap().action, "/auth/login");
    }

    #[test]
    fn test_button_submit_kinds() {
        let input_submit = ButtonElement {
            tag: ButtonTag::InputSubmit,
            ..Default::default()
        };
        let plain = ButtonElement {
            tag: ButtonTag::Button,
            button_type: "button".to_string(),
            ..Default::default()
        };
        assert!(input_submit.is_submit());
        assert!(!plain.is_submit());
    }
}
