use std::sync::Arc;

use super::*;
use axum::{
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Debug, Clone, PartialEq)]
struct CapturedPart {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    text: String,
}

#[derive(Debug, Clone)]
enum Captured {
    Multipart {
        path: String,
        parts: Vec<CapturedPart>,
    },
    Json {
        path: String,
        body: Value,
    },
    Delete {
        path: String,
    },
}

#[derive(Clone, Default)]
struct ServerState {
    captured: Arc<Mutex<Vec<Captured>>>,
}

async fn read_parts(mut multipart: Multipart) -> Vec<CapturedPart> {
    let mut parts = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.unwrap_or_default();
        parts.push(CapturedPart {
            name,
            file_name,
            content_type,
            text: String::from_utf8_lossy(&bytes).into_owned(),
        });
    }
    parts
}

async fn list_students() -> Json<Value> {
    Json(json!({"data": {"students": [{"id": 1, "name": "Amina"}, {"id": 2, "name": "Bilal"}]}}))
}

async fn list_lessons() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "database offline")
}

async fn create_student(
    State(state): State<ServerState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    let accept = headers
        .get("accept")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let parts = read_parts(multipart).await;
    let email = parts
        .iter()
        .find(|part| part.name == "email")
        .map(|part| part.text.clone())
        .unwrap_or_default();
    state.captured.lock().await.push(Captured::Multipart {
        path: "/students".to_string(),
        parts,
    });

    if email == "taken@example.com" {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "message": "The given data was invalid.",
                "errors": {"email": ["already taken"], "name": ["too short", "must be unique"]}
            })),
        );
    }
    (
        StatusCode::CREATED,
        Json(json!({"message": "created", "data": {"id": 10, "email": email, "accept": accept}})),
    )
}

async fn update_instructor(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Json<Value> {
    let parts = read_parts(multipart).await;
    state.captured.lock().await.push(Captured::Multipart {
        path: format!("/instructors/{id}"),
        parts,
    });
    Json(json!({"id": id}))
}

async fn update_recitation(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.captured.lock().await.push(Captured::Json {
        path: format!("/recitation/{id}"),
        body: body.clone(),
    });
    Json(json!({"data": body}))
}

async fn delete_course(State(state): State<ServerState>, Path(id): Path<i64>) -> StatusCode {
    state.captured.lock().await.push(Captured::Delete {
        path: format!("/courses/{id}"),
    });
    StatusCode::NO_CONTENT
}

async fn reject_course_without_field_errors() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({"message": "unprocessable"})),
    )
}

async fn spawn_api_server() -> (String, ServerState) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let state = ServerState::default();
    let app = Router::new()
        .route("/api/students", get(list_students).post(create_student))
        .route("/api/lessons", get(list_lessons))
        .route("/api/instructors/:id", post(update_instructor))
        .route("/api/recitation/:id", axum::routing::put(update_recitation))
        .route(
            "/api/courses/:id",
            axum::routing::delete(delete_course).put(reject_course_without_field_errors),
        )
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}/api/"), state)
}

fn student_payload(email: &str) -> Payload {
    Payload::Multipart(
        MultipartPayload::new()
            .text("name", "Amina")
            .text("email", email)
            .repeated("quran_passed_parts[]", ["1", "2"])
            .file(
                "student_img",
                Some(&FileAttachment {
                    file_name: "amina.png".to_string(),
                    mime_type: "image/png".to_string(),
                    bytes: b"png-bytes".to_vec(),
                }),
            ),
    )
}

#[tokio::test]
async fn get_all_normalizes_nested_envelope() {
    let (base_url, _state) = spawn_api_server().await;
    let client = ApiClient::new(&base_url).expect("client");

    let students = client.get_all(Resource::Students).await.expect("students");
    assert_eq!(students.len(), 2);
    assert_eq!(students[1]["name"], "Bilal");
}

#[tokio::test]
async fn get_all_surfaces_server_failure_as_status_error() {
    let (base_url, _state) = spawn_api_server().await;
    let client = ApiClient::new(&base_url).expect("client");

    let err = client
        .get_all(Resource::Lessons)
        .await
        .expect_err("must fail");
    match err {
        ClientError::Status { status, body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(body, "database offline");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn create_sends_multipart_parts_in_order() {
    let (base_url, state) = spawn_api_server().await;
    let client = ApiClient::new(&base_url).expect("client");

    let created = client
        .create(Resource::Students, student_payload("amina@example.com"))
        .await
        .expect("create");
    assert_eq!(created["id"], 10);
    assert_eq!(created["accept"], "application/json");

    let captured = state.captured.lock().await;
    let Some(Captured::Multipart { path, parts }) = captured.first() else {
        panic!("expected multipart capture");
    };
    assert_eq!(path, "/students");
    let names: Vec<&str> = parts.iter().map(|part| part.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "name",
            "email",
            "quran_passed_parts[]",
            "quran_passed_parts[]",
            "student_img"
        ]
    );
    let image = &parts[4];
    assert_eq!(image.file_name.as_deref(), Some("amina.png"));
    assert_eq!(image.content_type.as_deref(), Some("image/png"));
    assert_eq!(image.text, "png-bytes");
}

#[tokio::test]
async fn create_maps_422_to_validation_error() {
    let (base_url, _state) = spawn_api_server().await;
    let client = ApiClient::new(&base_url).expect("client");

    let err = client
        .create(Resource::Students, student_payload("taken@example.com"))
        .await
        .expect_err("must fail");
    assert!(matches!(err, ClientError::Validation { status: 422, .. }));
    let fields = err.validation_fields().expect("fields");
    assert_eq!(fields.first("email"), Some("already taken"));
    assert_eq!(fields.messages("name"), ["too short", "must be unique"]);
}

#[tokio::test]
async fn unstructured_422_is_not_a_validation_error() {
    let (base_url, _state) = spawn_api_server().await;
    let client = ApiClient::new(&base_url).expect("client");

    let err = client
        .update(Resource::Courses, 2, Payload::Json(json!({"title": "x"})))
        .await
        .expect_err("must fail");
    assert!(matches!(err, ClientError::Status { status: 422, .. }));
}

#[tokio::test]
async fn multipart_update_posts_with_method_override() {
    let (base_url, state) = spawn_api_server().await;
    let client = ApiClient::new(&base_url).expect("client");

    client
        .update(
            Resource::Instructors,
            3,
            Payload::Multipart(MultipartPayload::new().text("name", "Yusuf")),
        )
        .await
        .expect("update");

    let captured = state.captured.lock().await;
    let Some(Captured::Multipart { path, parts }) = captured.first() else {
        panic!("expected multipart capture");
    };
    assert_eq!(path, "/instructors/3");
    assert!(parts
        .iter()
        .any(|part| part.name == "_method" && part.text == "PUT"));
}

#[tokio::test]
async fn json_update_uses_put_and_unwraps_data() {
    let (base_url, state) = spawn_api_server().await;
    let client = ApiClient::new(&base_url).expect("client");

    let updated = client
        .update(
            Resource::Recitations,
            5,
            Payload::Json(json!({"current_juz": 3})),
        )
        .await
        .expect("update");
    assert_eq!(updated, json!({"current_juz": 3}));

    let captured = state.captured.lock().await;
    assert!(matches!(
        captured.first(),
        Some(Captured::Json { path, body }) if path == "/recitation/5" && body["current_juz"] == 3
    ));
}

#[tokio::test]
async fn delete_accepts_empty_success_body() {
    let (base_url, state) = spawn_api_server().await;
    let client = ApiClient::new(&base_url).expect("client");

    client
        .delete(Resource::Courses, 2)
        .await
        .expect("delete");

    let captured = state.captured.lock().await;
    assert!(matches!(
        captured.first(),
        Some(Captured::Delete { path }) if path == "/courses/2"
    ));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = ApiClient::new(&format!("http://{addr}/api")).expect("client");
    let err = client
        .get_all(Resource::Students)
        .await
        .expect_err("must fail");
    assert!(matches!(err, ClientError::Transport(_)));
}

#[test]
fn client_rejects_invalid_base_url() {
    assert!(ApiClient::new("localhost without scheme").is_err());
}
