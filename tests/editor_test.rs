mod common;

use activity_admin::api::ApiError;
use activity_admin::models::{FacultyRecord, FieldError, StudentRecord};
use activity_admin::workflow::{EditOutcome, Level, ListLoader, Notifications, RecordEditor};
use common::{Call, FakeBackend};

#[tokio::test]
async fn test_edit_saves_whole_record() {
    let backend = FakeBackend::with_faculties(2, 3);
    let mut loader = ListLoader::<FacultyRecord>::new();
    let mut notes = Notifications::new();
    loader.load(&backend, &mut notes).await.expect("load");

    let mut editor = RecordEditor::new();
    editor.begin(&loader.records()[0].clone());
    editor.set_field("department", "MECH").expect("department");
    editor.set_field("approved", "false").expect("approved");

    let outcome = editor.submit(&backend, &mut loader, &mut notes).await;
    assert_eq!(outcome, EditOutcome::Saved);
    assert!(!editor.is_open());

    let saved = &loader.records()[0];
    assert_eq!(saved.department, "MECH");
    assert!(!saved.approved);
    // Untouched fields travel with the PUT unchanged.
    assert_eq!(saved.name, "Faculty 1");
    assert_eq!(saved.assigned_events_count, 3);
    assert_eq!(notes.notices()[0].message, "Faculty updated successfully");
    assert_eq!(
        backend.calls(),
        vec![
            Call::List(activity_admin::models::Collection::Faculties),
            Call::Update(activity_admin::models::Collection::Faculties, 1),
            Call::List(activity_admin::models::Collection::Faculties),
        ]
    );
}

#[tokio::test]
async fn test_failed_submit_keeps_draft() {
    let backend = FakeBackend::with_students(1);
    let mut loader = ListLoader::<StudentRecord>::new();
    let mut notes = Notifications::new();
    loader.load(&backend, &mut notes).await.expect("load");

    let mut editor = RecordEditor::new();
    editor.begin(&loader.records()[0].clone());
    editor.set_field("phone", "12345").expect("phone");
    backend.fail_next(ApiError::Rejected { status: 400, message: "Invalid phone".to_string() });

    let outcome = editor.submit(&backend, &mut loader, &mut notes).await;
    assert_eq!(outcome, EditOutcome::Failed);
    assert_eq!(editor.draft().map(|d| d.phone.as_str()), Some("12345"));
    assert_eq!(notes.notices()[0].level, Level::Error);
    assert_eq!(notes.notices()[0].message, "Invalid phone");
    assert_eq!(loader.records()[0].phone, "8000000000");
}

#[tokio::test]
async fn test_submit_without_draft_is_noop() {
    let backend = FakeBackend::with_students(1);
    let mut loader = ListLoader::<StudentRecord>::new();
    let mut notes = Notifications::new();
    let mut editor = RecordEditor::<StudentRecord>::new();

    assert_eq!(editor.submit(&backend, &mut loader, &mut notes).await, EditOutcome::NoDraft);
    assert_eq!(backend.call_count(), 0);
}

#[test]
fn test_cancel_discards_changes() {
    let original = common::faculty(4, 0);
    let mut editor = RecordEditor::new();
    editor.begin(&original);
    editor.set_field("name", "Renamed").expect("name");
    editor.cancel();
    assert!(editor.draft().is_none());
    assert_eq!(original.name, "Faculty 4");
}

#[test]
fn test_unknown_and_invalid_fields() {
    let mut editor = RecordEditor::new();
    assert_eq!(editor.set_field("name", "x"), Err(FieldError::Unknown("name".to_string())));

    editor.begin(&common::faculty(1, 0));
    assert_eq!(editor.set_field("id", "9"), Err(FieldError::Unknown("id".to_string())));
    assert!(matches!(editor.set_field("approved", "perhaps"), Err(FieldError::Invalid { .. })));
    assert_eq!(editor.draft().map(|d| d.id), Some(1));

    let mut students = RecordEditor::new();
    students.begin(&common::student(2));
    assert!(students.set_field("approved", "true").is_err(), "students have no approval flag");
}

#[test]
fn test_begin_replaces_open_draft() {
    let mut editor = RecordEditor::new();
    editor.begin(&common::faculty(1, 0));
    editor.set_field("name", "Changed").expect("name");
    editor.begin(&common::faculty(2, 0));
    let draft = editor.draft().expect("draft");
    assert_eq!(draft.id, 2);
    assert_eq!(draft.name, "Faculty 2");
}
