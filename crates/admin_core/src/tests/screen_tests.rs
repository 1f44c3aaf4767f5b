use super::*;
use crate::{
    commands::execute,
    forms::{CourseForm, RecitationForm, StudentForm},
    test_support::{drive, InMemoryApi},
};
use client_core::Resource;
use serde_json::json;

fn students_api() -> InMemoryApi {
    InMemoryApi::default().with_records(
        Resource::Students,
        vec![
            json!({"id": 1, "name": "Amina", "email": "amina@example.com"}),
            json!({"id": 2, "name": "Bilal", "email": "bilal@example.com"}),
        ],
    )
}

async fn loaded_students(api: &InMemoryApi) -> EntityScreen<StudentForm> {
    let mut screen = EntityScreen::<StudentForm>::new(LookupFailurePolicy::RenderEmpty);
    let command = screen.mount();
    assert!(screen.is_loading());
    drive(&mut screen, api, Some(command)).await;
    screen
}

fn fill_new_student(screen: &mut EntityScreen<StudentForm>, email: &str) {
    let draft = &mut screen.modal_mut().expect("modal").form_mut().draft;
    draft.name = "Chadia".to_string();
    draft.email = email.to_string();
    draft.password = "secret".to_string();
    draft.password_confirmation = "secret".to_string();
    draft.phone_number = "555-0100".to_string();
    draft.birth_date = "2012-04-01".to_string();
    draft.enroll_date = "2024-09-01".to_string();
    draft.address = "12 Mosque Lane".to_string();
}

#[tokio::test]
async fn mount_loads_records() {
    let api = students_api();
    let screen = loaded_students(&api).await;

    assert!(!screen.is_loading());
    assert_eq!(screen.records().len(), 2);
    assert_eq!(api.count("get_all:students"), 1);
}

#[tokio::test]
async fn failed_fetch_renders_an_empty_list() {
    let api = students_api();
    api.fail_list(Resource::Students);
    let screen = loaded_students(&api).await;

    assert!(!screen.is_loading());
    assert!(screen.records().is_empty());
}

#[tokio::test]
async fn search_filters_loaded_records_without_fetching() {
    let api = students_api();
    let mut screen = loaded_students(&api).await;

    screen.set_search("bilal@");
    let visible: Vec<&str> = screen
        .visible_records()
        .into_iter()
        .map(|student| student.name.as_str())
        .collect();
    assert_eq!(visible, vec!["Bilal"]);

    screen.set_search("amina");
    assert_eq!(screen.visible_records().len(), 1);
    screen.set_search("AMINA");
    assert!(screen.visible_records().is_empty());
    screen.set_search("");
    assert_eq!(screen.visible_records().len(), 2);

    assert_eq!(api.count("get_all:students"), 1);
}

#[tokio::test]
async fn recitation_search_matches_numeric_ids() {
    let api = InMemoryApi::default().with_records(
        Resource::Recitations,
        vec![
            json!({"id": 1, "student_id": 12, "course_id": 3}),
            json!({"id": 2, "student_id": 7, "course_id": 41}),
            json!({"id": 3}),
        ],
    );
    let mut screen = EntityScreen::<RecitationForm>::new(LookupFailurePolicy::RenderEmpty);
    let command = screen.mount();
    drive(&mut screen, &api, Some(command)).await;

    screen.set_search("1");
    let ids: Vec<Option<i64>> = screen
        .visible_records()
        .into_iter()
        .map(|recitation| recitation.id())
        .collect();
    assert_eq!(ids, vec![Some(1), Some(2)]);
}

#[tokio::test]
async fn loosely_typed_records_stay_listed() {
    let api = InMemoryApi::default()
        .with_records(
            Resource::Courses,
            vec![
                json!({"id": 1, "type": null, "title": "Morning"}),
                json!({"id": 2, "type": "TahfeezCourse", "title": "Evening"}),
            ],
        )
        .with_records(
            Resource::Recitations,
            vec![
                json!({"id": 1, "student_id": 4, "current_juz": "3"}),
                json!({"id": 2, "student_id": "4", "current_juz": 2}),
            ],
        );

    let mut courses = EntityScreen::<CourseForm>::new(LookupFailurePolicy::RenderEmpty);
    let command = courses.mount();
    drive(&mut courses, &api, Some(command)).await;
    let course_ids: Vec<Option<i64>> = courses.records().iter().map(Entity::id).collect();
    assert_eq!(course_ids, vec![Some(1), Some(2)]);

    let mut recitations = EntityScreen::<RecitationForm>::new(LookupFailurePolicy::RenderEmpty);
    let command = recitations.mount();
    drive(&mut recitations, &api, Some(command)).await;
    assert_eq!(recitations.records().len(), 2);
    assert_eq!(recitations.records()[0].current_juz, 3);
    assert!(recitations.open_edit(2).is_some());
    assert_eq!(
        recitations.modal().expect("modal").form().draft.student_id,
        Some(shared::domain::StudentId(4))
    );
}

#[tokio::test]
async fn create_refetches_and_closes_the_modal() {
    let api = students_api();
    let mut screen = loaded_students(&api).await;

    assert!(screen.open_create().is_none());
    assert_eq!(
        screen.modal().map(FormSession::title).as_deref(),
        Some("Add New Student")
    );
    fill_new_student(&mut screen, "chadia@example.com");

    let command = screen.submit().expect("create command");
    assert!(matches!(command, Command::Create { .. }));
    assert!(screen.modal().expect("modal").is_saving());
    drive(&mut screen, &api, Some(command)).await;

    assert!(!screen.is_modal_open());
    assert_eq!(api.count("create:students"), 1);
    assert_eq!(api.count("get_all:students"), 2);
    let payload = api.last_payload().expect("create payload");
    assert!(payload.is_multipart());
    assert!(screen
        .records()
        .iter()
        .any(|student| student.email == "chadia@example.com" && student.id.is_some()));
}

#[tokio::test]
async fn server_validation_keeps_modal_open_without_refetch() {
    let api = students_api();
    let mut screen = loaded_students(&api).await;
    api.reject_saves_with([("email", "already taken")].into_iter().collect());

    screen.open_create();
    fill_new_student(&mut screen, "amina@example.com");
    let command = screen.submit();
    drive(&mut screen, &api, command).await;

    let modal = screen.modal().expect("modal stays open");
    assert_eq!(modal.errors().first("email"), Some("already taken"));
    assert!(!modal.is_saving());
    assert_eq!(modal.form().draft.email, "amina@example.com");
    assert_eq!(api.count("get_all:students"), 1);
}

#[tokio::test]
async fn errors_are_cleared_on_the_next_submit() {
    let api = students_api();
    let mut screen = loaded_students(&api).await;
    api.reject_saves_with([("email", "already taken")].into_iter().collect());

    screen.open_create();
    fill_new_student(&mut screen, "amina@example.com");
    let command = screen.submit();
    drive(&mut screen, &api, command).await;
    assert!(!screen.modal().expect("modal").errors().is_empty());

    screen.modal_mut().expect("modal").form_mut().draft.name.clear();
    assert!(screen.submit().is_none());
    let errors = screen.modal().expect("modal").errors();
    assert!(!errors.contains("email"));
    assert_eq!(errors.first("name"), Some("The name field is required."));
}

#[tokio::test]
async fn transport_failure_keeps_modal_open_without_field_errors() {
    let api = students_api();
    let mut screen = loaded_students(&api).await;
    api.fail_saves();

    screen.open_create();
    fill_new_student(&mut screen, "chadia@example.com");
    let command = screen.submit();
    drive(&mut screen, &api, command).await;

    let modal = screen.modal().expect("modal stays open");
    assert!(modal.errors().is_empty());
    assert!(!modal.is_saving());
    assert_eq!(api.count("get_all:students"), 1);
}

#[tokio::test]
async fn password_mismatch_is_reported_like_a_field_error() {
    let api = students_api();
    let mut screen = loaded_students(&api).await;

    screen.open_create();
    fill_new_student(&mut screen, "chadia@example.com");
    screen
        .modal_mut()
        .expect("modal")
        .form_mut()
        .draft
        .password_confirmation = "different".to_string();

    assert!(screen.submit().is_none());
    assert_eq!(
        screen
            .modal()
            .expect("modal")
            .errors()
            .first("password_confirmation"),
        Some(crate::forms::PASSWORD_MISMATCH)
    );
    assert_eq!(api.count("create:students"), 0);
}

#[tokio::test]
async fn cancel_discards_the_draft() {
    let api = students_api();
    let mut screen = loaded_students(&api).await;

    screen.open_edit(1);
    screen.modal_mut().expect("modal").form_mut().draft.name = "Changed".to_string();
    screen.cancel();
    assert!(!screen.is_modal_open());

    screen.open_edit(1);
    let modal = screen.modal().expect("modal");
    assert_eq!(modal.form().draft.name, "Amina");
    assert_eq!(modal.title(), "Edit Student");
    assert!(modal.errors().is_empty());
}

#[tokio::test]
async fn edit_submits_an_update_for_the_record_id() {
    let api = students_api();
    let mut screen = loaded_students(&api).await;

    screen.open_edit(2);
    screen.modal_mut().expect("modal").form_mut().draft.name = "Bilal Ahmed".to_string();
    screen
        .modal_mut()
        .expect("modal")
        .form_mut()
        .draft
        .phone_number = "555-0101".to_string();
    screen
        .modal_mut()
        .expect("modal")
        .form_mut()
        .draft
        .birth_date = "2011-01-01".to_string();
    screen
        .modal_mut()
        .expect("modal")
        .form_mut()
        .draft
        .enroll_date = "2023-09-01".to_string();
    screen.modal_mut().expect("modal").form_mut().draft.address = "3 Hill Rd".to_string();

    let command = screen.submit().expect("update command");
    assert!(matches!(command, Command::Update { id: 2, .. }));
    drive(&mut screen, &api, Some(command)).await;

    assert!(!screen.is_modal_open());
    assert!(screen
        .records()
        .iter()
        .any(|student| student.name == "Bilal Ahmed"));
}

#[tokio::test]
async fn edit_of_unknown_record_is_ignored() {
    let api = students_api();
    let mut screen = loaded_students(&api).await;
    assert!(screen.open_edit(99).is_none());
    assert!(!screen.is_modal_open());
}

#[tokio::test]
async fn delete_requires_confirmation() {
    let api = students_api();
    let mut screen = loaded_students(&api).await;

    let mut prompted = None;
    let declined = screen.delete(1, |student| {
        prompted = Some(student.name.clone());
        false
    });
    assert!(declined.is_none());
    assert_eq!(prompted.as_deref(), Some("Amina"));
    assert_eq!(api.count("delete:students"), 0);

    let command = screen.delete(1, |_| true);
    drive(&mut screen, &api, command).await;
    assert_eq!(api.count("delete:students"), 1);
    assert_eq!(api.count("get_all:students"), 2);
    assert_eq!(screen.records().len(), 1);
}

#[tokio::test]
async fn course_form_loads_lookups_jointly() {
    let api = InMemoryApi::default()
        .with_records(Resource::Students, vec![json!({"id": 1, "name": "Amina"})])
        .with_records(
            Resource::Instructors,
            vec![json!({"id": 5, "name": "Yusuf"}), json!({"name": "No id"})],
        );
    let mut screen = EntityScreen::<CourseForm>::new(LookupFailurePolicy::RenderEmpty);

    let command = screen.open_create().expect("lookup command");
    assert!(matches!(
        &command,
        Command::LoadLookups { lookups, .. }
            if lookups == &vec![Resource::Students, Resource::Instructors]
    ));
    assert!(screen.modal().expect("modal").lookups_pending());
    drive(&mut screen, &api, Some(command)).await;

    let modal = screen.modal().expect("modal");
    assert!(!modal.lookups_pending());
    assert!(!modal.lookups_degraded());
    assert_eq!(modal.form().students.options().len(), 1);
    assert_eq!(modal.form().instructors.options().len(), 1);
    assert_eq!(modal.form().instructors.options()[0].label, "Yusuf");
}

#[tokio::test]
async fn failed_lookup_empties_every_picker_and_still_allows_submit() {
    let api = InMemoryApi::default()
        .with_records(Resource::Courses, vec![json!({"id": 1, "title": "Morning"})])
        .with_records(Resource::Students, vec![json!({"id": 2, "name": "Amina"})]);
    api.fail_list(Resource::Lessons);
    let mut screen = EntityScreen::<RecitationForm>::new(LookupFailurePolicy::RenderEmpty);

    let command = screen.open_create();
    drive(&mut screen, &api, command).await;
    let modal = screen.modal().expect("modal");
    assert!(modal.lookups_degraded());
    assert!(modal.form().courses.options().is_empty());
    assert!(modal.form().students.options().is_empty());
    assert!(modal.form().lessons.options().is_empty());

    let draft = &mut screen.modal_mut().expect("modal").form_mut().draft;
    draft.course_id = Some(shared::domain::CourseId(1));
    draft.lesson_id = Some(shared::domain::LessonId(4));
    draft.student_id = Some(shared::domain::StudentId(2));
    draft.recitation_evaluation = Some(shared::domain::Evaluation::Fair);
    assert!(matches!(screen.submit(), Some(Command::Create { .. })));
}

#[tokio::test]
async fn block_submit_policy_refuses_degraded_forms() {
    let api = InMemoryApi::default();
    api.fail_list(Resource::Instructors);
    let mut screen = EntityScreen::<CourseForm>::new(LookupFailurePolicy::BlockSubmit);

    let command = screen.open_create();
    drive(&mut screen, &api, command).await;

    assert!(screen.submit().is_none());
    assert_eq!(
        screen
            .modal()
            .expect("modal")
            .errors()
            .first(REFERENCE_DATA_FIELD),
        Some(REFERENCE_DATA_UNAVAILABLE)
    );
    assert_eq!(api.count("create:courses"), 0);
}

#[tokio::test]
async fn lookups_for_a_closed_form_are_dropped() {
    let api = InMemoryApi::default()
        .with_records(Resource::Students, vec![json!({"id": 1, "name": "Amina"})]);
    let mut screen = EntityScreen::<CourseForm>::new(LookupFailurePolicy::RenderEmpty);

    let stale = screen.open_create().expect("lookup command");
    screen.cancel();
    let fresh = screen.open_create().expect("lookup command");

    let outcome = execute(&api, stale).await;
    assert!(screen.apply(outcome).is_none());
    assert!(screen.modal().expect("modal").lookups_pending());

    drive(&mut screen, &api, Some(fresh)).await;
    assert_eq!(screen.modal().expect("modal").form().students.options().len(), 1);
}

#[tokio::test]
async fn save_finishing_after_cancel_still_refetches() {
    let api = students_api();
    let mut screen = loaded_students(&api).await;

    screen.open_create();
    fill_new_student(&mut screen, "chadia@example.com");
    let command = screen.submit().expect("create command");
    assert!(screen.submit().is_none(), "second submit while saving is ignored");
    screen.cancel();

    drive(&mut screen, &api, Some(command)).await;
    assert!(!screen.is_modal_open());
    assert_eq!(screen.records().len(), 3);
}

#[tokio::test]
async fn outcomes_for_other_screens_are_ignored() {
    let api = students_api();
    let mut screen = loaded_students(&api).await;
    let outcome = execute(
        &api,
        Command::FetchAll {
            resource: Resource::Courses,
        },
    )
    .await;
    assert!(screen.apply(outcome).is_none());
    assert_eq!(screen.records().len(), 2);
}
