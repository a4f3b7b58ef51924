use super::*;
use crate::snapshot::{ButtonTag, SnapshotBuilder};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Op {
    Fill(ElementId, String),
    Submit(FormId),
    Click(ElementId),
}

#[derive(Default)]
struct RecordingDriver {
    ops: Mutex<Vec<Op>>,
}

impl PageDriver for RecordingDriver {
    fn fill(&self, input: ElementId, value: &str) {
        self.ops.lock().push(Op::Fill(input, value.to_string()));
    }

    fn submit_form(&self, form: FormId) {
        self.ops.lock().push(Op::Submit(form));
    }

    fn click(&self, button: ElementId) {
        self.ops.lock().push(Op::Click(button));
    }
}

fn alice() -> CredentialRecord {
    CredentialRecord::new("univille.br", "alice", "secret1")
}

fn login_page() -> PageSnapshot {
    SnapshotBuilder::new("https://univille.br/login")
        .form("/login")
        .input("text", "user", "")
        .input("password", "pass", "")
        .build()
}

#[test]
fn test_plan_fills_both_fields() {
    let page = login_page();
    let plan = plan_fill(&page, &alice(), true);

    assert_eq!(
        plan.fills,
        vec![
            (page.inputs[1].id, "secret1".to_string()),
            (page.inputs[0].id, "alice".to_string()),
        ]
    );
    assert_eq!(plan.submit, Some(SubmitAction::Form(page.forms[0].id)));
}

#[test]
fn test_plan_skips_empty_values() {
    let page = login_page();
    let record = CredentialRecord::new("univille.br", "", "secret1");
    let plan = plan_fill(&page, &record, false);
    assert_eq!(plan.fills, vec![(page.inputs[1].id, "secret1".to_string())]);
    assert_eq!(plan.submit, None);
}

#[test]
fn test_plan_without_targets_does_not_submit() {
    let page = SnapshotBuilder::new("https://univille.br/")
        .form("/search")
        .end_form()
        .build();
    let plan = plan_fill(&page, &alice(), true);
    assert!(plan.is_empty());
    assert_eq!(plan.submit, None);
}

#[test]
fn test_plan_without_data_does_not_submit() {
    let page = login_page();
    let record = CredentialRecord::new("univille.br", "", "");
    assert_eq!(plan_fill(&page, &record, true).submit, None);
}

#[test]
fn test_plan_formless_uses_button() {
    let page = SnapshotBuilder::new("https://univille.br/")
        .input("text", "login", "")
        .input("password", "pass", "")
        .button(ButtonTag::RoleButton, "", "Entrar")
        .build();
    let plan = plan_fill(&page, &alice(), true);
    assert_eq!(plan.submit, Some(SubmitAction::Button(page.buttons[0].id)));
}

#[test]
fn test_apply_writes_values() {
    let page = login_page();
    let driver = RecordingDriver::default();
    plan_fill(&page, &alice(), false).apply(&driver);

    let ops = driver.ops.lock();
    assert_eq!(ops.len(), 2);
    assert!(ops.contains(&Op::Fill(page.inputs[0].id, "alice".to_string())));
}

#[tokio::test(start_paused = true)]
async fn test_auto_login_fires_once_after_delay() {
    let driver = Arc::new(RecordingDriver::default());
    let scheduler = AutoLoginScheduler::default();
    let form = FormId(7);

    assert!(scheduler.schedule(driver.clone(), SubmitAction::Form(form)));
    assert!(!scheduler.schedule(driver.clone(), SubmitAction::Form(form)));
    assert!(scheduler.has_triggered());

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(driver.ops.lock().is_empty());

    scheduler.wait().await;
    assert_eq!(*driver.ops.lock(), vec![Op::Submit(form)]);
}

#[tokio::test(start_paused = true)]
async fn test_auto_login_cancel() {
    let driver = Arc::new(RecordingDriver::default());
    let scheduler = AutoLoginScheduler::new(Duration::from_millis(250));

    scheduler.schedule(driver.clone(), SubmitAction::Button(ElementId(3)));
    scheduler.cancel();
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert!(driver.ops.lock().is_empty());
    assert!(!scheduler.schedule(driver.clone(), SubmitAction::Button(ElementId(3))));
}
