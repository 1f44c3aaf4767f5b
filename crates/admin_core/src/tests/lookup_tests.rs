use super::*;
use crate::test_support::InMemoryApi;
use serde_json::json;
use shared::domain::{Lesson, Student};

#[tokio::test]
async fn loads_every_requested_list() {
    let api = InMemoryApi::default()
        .with_records(
            Resource::Students,
            vec![json!({"id": 1, "name": "Amina"}), json!({"id": 2, "name": "Bilal"})],
        )
        .with_records(
            Resource::Lessons,
            vec![json!({"id": 9, "lesson_title": "Al-Fatiha"})],
        );

    let data = load_reference_data(&api, &[Resource::Students, Resource::Lessons]).await;

    assert!(!data.is_degraded());
    assert_eq!(data.records::<Student>(Resource::Students).len(), 2);
    let lessons = data.records::<Lesson>(Resource::Lessons);
    assert_eq!(lessons[0].lesson_title, "Al-Fatiha");
    assert_eq!(api.count("get_all:students"), 1);
    assert_eq!(api.count("get_all:lessons"), 1);
}

#[tokio::test]
async fn one_failure_degrades_the_whole_batch() {
    let api = InMemoryApi::default()
        .with_records(Resource::Courses, vec![json!({"id": 1, "title": "Morning"})])
        .with_records(Resource::Students, vec![json!({"id": 1, "name": "Amina"})]);
    api.fail_list(Resource::Lessons);

    let data = load_reference_data(
        &api,
        &[Resource::Courses, Resource::Lessons, Resource::Students],
    )
    .await;

    assert!(data.is_degraded());
    assert!(data.raw(Resource::Courses).is_empty());
    assert!(data.raw(Resource::Students).is_empty());
    assert_eq!(api.calls().len(), 3, "every lookup is still attempted");
}

#[test]
fn undecodable_records_are_skipped() {
    let data = ReferenceData::from_lists([(
        Resource::Students,
        vec![json!({"id": 1, "name": "Amina"}), json!("not a student")],
    )]);
    assert_eq!(data.records::<Student>(Resource::Students).len(), 1);
    assert!(data.raw(Resource::Instructors).is_empty());
}
