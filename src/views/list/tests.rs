use super::*;
use crate::config::ClientConfig;
use crate::host::mock::{RecordingNavigator, ScriptedConfirm};
use crate::request::HttpMethod;
use crate::request::mock::MockHttpClient;
use crate::session::{MemoryTokenStore, Session};
use serde_json::json;
use std::sync::Arc;

const LIST_URL: &str = "/api/v1/students/";

fn api(client: &MockHttpClient) -> (ApiClient<&MockHttpClient>, Arc<RecordingNavigator>) {
    let navigator = Arc::new(RecordingNavigator::default());
    let session = Session::new(Arc::new(MemoryTokenStore::with_token("jwt")));
    let api = ApiClient::new(client, ClientConfig::default(), session, navigator.clone());
    (api, navigator)
}

fn raw(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{}@example.com", id),
        "grade": 3,
        "age": 8,
        "address": "42 Schoolhouse Road",
        "role": "student",
        "updated_at": "2024-03-01T09:30:00",
    })
}

async fn loaded(client: &MockHttpClient, body: serde_json::Value) -> ListViewState {
    client.mock_response(HttpMethod::Get, LIST_URL, 200, body);
    let (api, _) = api(client);
    load_students(&api).await
}

// =========================================================
// Load
// =========================================================

#[tokio::test]
async fn bare_list_renders_every_row() {
    let client = MockHttpClient::new();
    let state = loaded(&client, json!([raw("a", "Ann"), raw("b", "Ben"), raw("c", "Cy")])).await;

    assert_eq!(state.phase, LoadPhase::Ready);
    assert_eq!(state.records.len(), 3);
    assert_eq!(state.error, None);
    assert_eq!(state.records[0].grade_level, "3");
}

#[tokio::test]
async fn enveloped_list_renders_the_nested_rows() {
    let client = MockHttpClient::new();
    let state = loaded(&client, json!({"data": [raw("a", "Ann"), raw("b", "Ben")]})).await;

    assert_eq!(state.phase, LoadPhase::Ready);
    assert_eq!(state.records.len(), 2);
    assert_eq!(state.records[1].name, "Ben");
}

#[tokio::test]
async fn unexpected_shape_degrades_to_empty_list_with_message() {
    let client = MockHttpClient::new();
    let state = loaded(&client, json!({"count": 2})).await;

    assert_eq!(state.phase, LoadPhase::Ready);
    assert!(state.records.is_empty());
    assert_eq!(
        state.error.as_deref(),
        Some("Received an unexpected response from the server.")
    );
}

#[tokio::test]
async fn server_error_fails_the_load() {
    let client = MockHttpClient::new();
    client.mock_response(HttpMethod::Get, LIST_URL, 500, json!({"detail": "boom"}));
    let (api, navigator) = api(&client);
    let state = load_students(&api).await;

    assert_eq!(state.phase, LoadPhase::Failed);
    assert_eq!(state.error.as_deref(), Some(LOAD_FAILED));
    assert!(navigator.visits().is_empty());
}

#[tokio::test]
async fn auth_failure_during_load_redirects_to_login() {
    let client = MockHttpClient::new();
    client.mock_response(HttpMethod::Get, LIST_URL, 401, json!({"detail": "Not authenticated"}));
    let (api, navigator) = api(&client);

    let state = load_students(&api).await;

    assert_eq!(state.phase, LoadPhase::Failed);
    assert!(!api.session().is_authenticated());
    assert_eq!(navigator.visits(), vec!["/login".to_string()]);
}

// =========================================================
// Delete
// =========================================================

#[tokio::test]
async fn confirmed_delete_removes_exactly_one_row_without_refetch() {
    let client = MockHttpClient::new();
    let mut state = loaded(&client, json!([raw("a", "Ann"), raw("b", "Ben"), raw("c", "Cy")])).await;
    client.mock_response(HttpMethod::Delete, "/api/v1/students/b", 200, json!({"message": "deleted"}));
    let (api, _) = api(&client);
    let confirm = ScriptedConfirm::new(true);

    let target = state.records[1].clone();
    let outcome = delete_student(&api, &confirm, &target).await;
    state.apply_delete(&outcome);

    assert_eq!(outcome, DeleteOutcome::Deleted { id: "b".into() });
    assert_eq!(confirm.asked.get(), 1);
    assert_eq!(client.calls_to(HttpMethod::Delete, "/api/v1/students/b").len(), 1);
    assert_eq!(client.calls_to(HttpMethod::Get, LIST_URL).len(), 1);
    let names: Vec<&str> = state.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Ann", "Cy"]);
    assert_eq!(state.phase, LoadPhase::Ready);
}

#[tokio::test]
async fn plain_text_acknowledgement_still_removes_the_row() {
    let client = MockHttpClient::new();
    let mut state = loaded(&client, json!([raw("a", "Ann")])).await;
    client.mock_raw(HttpMethod::Delete, "/api/v1/students/a", 200, "Deleted");
    let (api, _) = api(&client);

    let target = state.records[0].clone();
    let outcome = delete_student(&api, &ScriptedConfirm::new(true), &target).await;
    state.apply_delete(&outcome);

    assert_eq!(outcome, DeleteOutcome::Deleted { id: "a".into() });
    assert!(state.records.is_empty());
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn cancelled_delete_issues_no_request() {
    let client = MockHttpClient::new();
    let mut state = loaded(&client, json!([raw("a", "Ann")])).await;
    let (api, _) = api(&client);
    let confirm = ScriptedConfirm::new(false);

    let target = state.records[0].clone();
    let outcome = delete_student(&api, &confirm, &target).await;
    state.apply_delete(&outcome);

    assert_eq!(outcome, DeleteOutcome::Cancelled);
    assert_eq!(client.calls_to(HttpMethod::Delete, "/api/v1/students/a").len(), 0);
    assert_eq!(state.records.len(), 1);
}

#[tokio::test]
async fn failed_delete_keeps_the_list_and_reports() {
    let client = MockHttpClient::new();
    let mut state = loaded(&client, json!([raw("a", "Ann"), raw("b", "Ben")])).await;
    client.mock_response(HttpMethod::Delete, "/api/v1/students/a", 404, json!({"detail": "Student not found"}));
    let (api, _) = api(&client);

    let target = state.records[0].clone();
    let outcome = delete_student(&api, &ScriptedConfirm::new(true), &target).await;
    state.apply_delete(&outcome);

    assert!(matches!(outcome, DeleteOutcome::Failed { id: Some(ref id), .. } if id == "a"));
    assert_eq!(state.records.len(), 2);
    assert_eq!(state.error.as_deref(), Some(DELETE_FAILED));
    assert_eq!(state.phase, LoadPhase::Ready);
}

#[tokio::test]
async fn legacy_identifier_is_used_for_delete() {
    let client = MockHttpClient::new();
    let mut legacy = raw("ignored", "Old");
    legacy.as_object_mut().unwrap().remove("id");
    legacy["_id"] = json!("legacy-1");
    let mut state = loaded(&client, json!([legacy])).await;
    client.mock_response(HttpMethod::Delete, "/api/v1/students/legacy-1", 204, serde_json::Value::Null);
    let (api, _) = api(&client);

    let target = state.records[0].clone();
    let outcome = delete_student(&api, &ScriptedConfirm::new(true), &target).await;
    state.apply_delete(&outcome);

    assert_eq!(outcome, DeleteOutcome::Deleted { id: "legacy-1".into() });
    assert!(state.records.is_empty());
}

#[test]
fn deleting_an_unknown_id_changes_nothing() {
    let mut state = ListViewState::from_result(Ok(Vec::new()));
    state.apply_delete(&DeleteOutcome::Deleted { id: "ghost".into() });
    assert!(state.records.is_empty());
    assert_eq!(state.phase, LoadPhase::Ready);
}

#[tokio::test]
async fn rows_without_identifiers_get_distinct_keys() {
    let client = MockHttpClient::new();
    let mut first = raw("x", "Twin");
    first.as_object_mut().unwrap().remove("id");
    let second = first.clone();
    let state = loaded(&client, json!([first, raw("a", "Ann"), second])).await;

    let keys: Vec<RowKey> = state.keyed_rows().into_iter().map(|(key, _)| key).collect();
    assert_eq!(
        keys,
        vec![RowKey::Position(0), RowKey::Id("a".into()), RowKey::Position(2)]
    );
}
