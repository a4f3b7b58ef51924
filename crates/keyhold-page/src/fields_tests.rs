use super::*;
use crate::snapshot::SnapshotBuilder;

const URL: &str = "https://univille.br/login";

#[test]
fn test_extract_named_username() {
    let snapshot = SnapshotBuilder::new(URL)
        .form("/login")
        .input("text", "search", "ignored")
        .input("text", "username", "alice")
        .input("password", "pass", "secret1")
        .build();
    let form = snapshot.forms[0].id;

    let pair = extract_credentials(&snapshot, Some(form)).unwrap();
    assert_eq!(pair.username, "alice");
    assert_eq!(pair.password, "secret1");
}

#[test]
fn test_extract_email_field() {
    let snapshot = SnapshotBuilder::new(URL)
        .form("/session")
        .input("email", "mail", "alice@univille.br")
        .input("password", "pw", "secret1")
        .build();
    let pair = extract_credentials(&snapshot, Some(snapshot.forms[0].id)).unwrap();
    assert_eq!(pair.username, "alice@univille.br");
}

#[test]
fn test_extract_autocomplete_username() {
    let snapshot = SnapshotBuilder::new(URL)
        .form("/session")
        .input("text", "a", "first")
        .input("text", "b", "alice")
        .autocomplete("username")
        .input("password", "c", "secret1")
        .build();
    let pair = extract_credentials(&snapshot, Some(snapshot.forms[0].id)).unwrap();
    assert_eq!(pair.username, "alice");
}

#[test]
fn test_extract_falls_back_to_preceding_input() {
    let snapshot = SnapshotBuilder::new(URL)
        .form("/session")
        .input("text", "cpf", "12345678900")
        .input("hidden", "csrf", "token")
        .input("password", "senha", "secret1")
        .build();
    let pair = extract_credentials(&snapshot, Some(snapshot.forms[0].id)).unwrap();
    assert_eq!(pair.username, "12345678900");
}

#[test]
fn test_extract_ignores_hidden_username_candidates() {
    let snapshot = SnapshotBuilder::new(URL)
        .form("/session")
        .input("hidden", "user_id", "42")
        .input("text", "cpf", "12345678900")
        .input("password", "senha", "secret1")
        .build();
    let pair = extract_credentials(&snapshot, Some(snapshot.forms[0].id)).unwrap();
    assert_eq!(pair.username, "12345678900");
}

#[test]
fn test_extract_requires_both_values() {
    let snapshot = SnapshotBuilder::new(URL)
        .form("/login")
        .input("text", "user", "")
        .input("password", "pass", "secret1")
        .build();
    assert!(extract_credentials(&snapshot, Some(snapshot.forms[0].id)).is_none());

    let snapshot = SnapshotBuilder::new(URL)
        .form("/login")
        .input("text", "user", "alice")
        .input("password", "pass", "")
        .build();
    assert!(extract_credentials(&snapshot, Some(snapshot.forms[0].id)).is_none());
}

#[test]
fn test_extract_without_password_field() {
    let snapshot = SnapshotBuilder::new(URL)
        .form("/search")
        .input("text", "user", "alice")
        .build();
    assert!(extract_credentials(&snapshot, Some(snapshot.forms[0].id)).is_none());
}

#[test]
fn test_extract_password_first_has_no_fallback() {
    let snapshot = SnapshotBuilder::new(URL)
        .input("password", "pass", "secret1")
        .input("text", "code", "123")
        .build();
    assert!(extract_credentials(&snapshot, None).is_none());
}

#[test]
fn test_extract_document_scope() {
    let snapshot = SnapshotBuilder::new(URL)
        .input("text", "login", "alice")
        .input("password", "pass", "secret1")
        .build();
    let pair = extract_credentials(&snapshot, None).unwrap();
    assert_eq!(pair.username, "alice");
}

#[test]
fn test_extract_scoped_to_form() {
    let snapshot = SnapshotBuilder::new(URL)
        .form("/newsletter")
        .input("email", "email", "news@example.com")
        .end_form()
        .form("/login")
        .input("text", "cpf", "12345678900")
        .input("password", "pass", "secret1")
        .build();
    let login = snapshot.forms[1].id;
    let pair = extract_credentials(&snapshot, Some(login)).unwrap();
    assert_eq!(pair.username, "12345678900");
}

#[test]
fn test_fill_targets_named_fields() {
    let snapshot = SnapshotBuilder::new(URL)
        .form("/login")
        .input("text", "login", "")
        .input("password", "pass", "")
        .build();
    let targets = fill_targets(&snapshot);
    assert_eq!(targets.username, Some(snapshot.inputs[0].id));
    assert_eq!(targets.password, Some(snapshot.inputs[1].id));
}

#[test]
fn test_fill_targets_preceding_in_form() {
    let snapshot = SnapshotBuilder::new(URL)
        .input("text", "q", "")
        .form("/auth")
        .input("text", "cpf", "")
        .input("password", "senha", "")
        .build();
    let targets = fill_targets(&snapshot);
    assert_eq!(targets.username, Some(snapshot.inputs[1].id));
}

#[test]
fn test_fill_targets_preceding_in_document() {
    let snapshot = SnapshotBuilder::new(URL)
        .input("text", "cpf", "")
        .input("password", "senha", "")
        .build();
    let targets = fill_targets(&snapshot);
    assert_eq!(targets.username, Some(snapshot.inputs[0].id));
}

#[test]
fn test_fill_targets_username_only_page() {
    let snapshot = SnapshotBuilder::new(URL)
        .input("email", "username", "")
        .build();
    let targets = fill_targets(&snapshot);
    assert_eq!(targets.username, Some(snapshot.inputs[0].id));
    assert_eq!(targets.password, None);
    assert!(!targets.is_empty());
}

#[test]
fn test_fill_targets_empty_page() {
    let snapshot = SnapshotBuilder::new(URL).build();
    assert!(fill_targets(&snapshot).is_empty());
}

#[test]
fn test_login_form_prefers_password_owner() {
    let snapshot = SnapshotBuilder::new(URL)
        .form("/search")
        .input("text", "q", "")
        .end_form()
        .form("/auth")
        .input("text", "user", "")
        .input("password", "pass", "")
        .build();
    let targets = fill_targets(&snapshot);
    assert_eq!(login_form(&snapshot, &targets), Some(snapshot.forms[1].id));
}

#[test]
fn test_login_form_by_action() {
    let snapshot = SnapshotBuilder::new(URL)
        .form("/search")
        .end_form()
        .form("/Account/SignIn")
        .end_form()
        .input("text", "user", "")
        .input("password", "pass", "")
        .build();
    let targets = fill_targets(&snapshot);
    assert_eq!(login_form(&snapshot, &targets), Some(snapshot.forms[1].id));
}

#[test]
fn test_login_form_first_form_fallback() {
    let snapshot = SnapshotBuilder::new(URL)
        .form("/search")
        .end_form()
        .input("password", "pass", "")
        .build();
    let targets = fill_targets(&snapshot);
    assert_eq!(login_form(&snapshot, &targets), Some(snapshot.forms[0].id));

    let formless = SnapshotBuilder::new(URL).input("password", "pass", "").build();
    assert_eq!(login_form(&formless, &fill_targets(&formless)), None);
}

#[test]
fn test_submit_button_typed_submit() {
    let snapshot = SnapshotBuilder::new(URL)
        .button(ButtonTag::Button, "button", "Entrar")
        .button(ButtonTag::InputSubmit, "", "Go")
        .build();
    assert_eq!(submit_button(&snapshot), Some(snapshot.buttons[1].id));
}

#[test]
fn test_submit_button_login_attribute() {
    let snapshot = SnapshotBuilder::new(URL)
        .button(ButtonTag::Button, "button", "Help")
        .button_with(ButtonElement {
            tag: ButtonTag::Button,
            button_type: "button".to_string(),
            data_testid: "login-button".to_string(),
            ..Default::default()
        })
        .build();
    assert_eq!(submit_button(&snapshot), Some(snapshot.buttons[1].id));
}

#[test]
fn test_submit_button_by_label() {
    let snapshot = SnapshotBuilder::new(URL)
        .button(ButtonTag::Button, "button", "Cancelar")
        .button(ButtonTag::RoleButton, "", "  ACESSAR conta ")
        .build();
    assert_eq!(submit_button(&snapshot), Some(snapshot.buttons[1].id));
}

#[test]
fn test_submit_button_none() {
    let snapshot = SnapshotBuilder::new(URL)
        .button(ButtonTag::InputButton, "", "Voltar")
        .build();
    assert_eq!(submit_button(&snapshot), None);
}
