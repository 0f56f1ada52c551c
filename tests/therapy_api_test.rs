//! Integration tests for the endpoint wrappers and the chat view over HTTP.

mod common;

use common::{client_for, signed_in_tokens};
use serde_json::json;
use therapy_chat::api::DisplayMessage;
use therapy_chat::view_state::{ChatView, DashboardView};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_sessions(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/Chats/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 7, "title": "Sleep", "AiMode": "therapy", "last_updated": "2024-04-02T09:00:00Z"},
            {"id": 8, "title": "Work", "AiMode": "coach", "last_updated": "2024-04-01T09:00:00Z"}
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_history_remap_handles_both_entry_shapes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ChatData/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"chat": 7, "content": [{"role": "user", "message": "hi"}]},
            {"chat": 8, "content": [{"role": "user", "content": "hi"}]},
            {"chat": 9, "content": null}
        ])))
        .mount(&server)
        .await;

    let test = client_for(&server, Some(signed_in_tokens())).await;
    let api = test.api();

    let expected = vec![DisplayMessage::user("hi")];
    assert_eq!(api.load_messages(7).await.unwrap(), expected);
    assert_eq!(api.load_messages(8).await.unwrap(), expected);
    assert!(api.load_messages(9).await.unwrap().is_empty());
    assert!(api.load_messages(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_then_select_starts_empty() {
    let server = MockServer::start().await;
    mount_sessions(&server).await;
    Mock::given(method("POST"))
        .and(path("/Chats/"))
        .and(body_json(json!({"title": "Anxiety about work", "AiMode": "therapy"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 11,
            "title": "Anxiety about work",
            "AiMode": "therapy",
            "last_updated": "2024-04-03T09:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let test = client_for(&server, Some(signed_in_tokens())).await;
    let mut view = ChatView::new(test.api());
    view.refresh_sessions().await.unwrap();
    view.create_session("Anxiety about work", "therapy").await.unwrap();

    let first = &view.sessions()[0];
    assert_eq!(first.title, "Anxiety about work");
    assert_eq!(first.ai_mode, "therapy");
    assert_eq!(view.active_session().map(|s| s.id), Some(11));
    assert!(view.messages().is_empty());
    assert_eq!(view.sessions().len(), 3);
}

#[tokio::test]
async fn test_send_uses_session_mode() {
    let server = MockServer::start().await;
    mount_sessions(&server).await;
    Mock::given(method("GET"))
        .and(path("/ChatData/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/ChatData/continue_chat/"))
        .and(header("Authorization", "Bearer access-1"))
        .and(body_json(json!({"ChatID": 8, "prompt": "Deadlines", "mode": "coach"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "Let's plan."})))
        .expect(1)
        .mount(&server)
        .await;

    let test = client_for(&server, Some(signed_in_tokens())).await;
    let mut view = ChatView::new(test.api());
    view.refresh_sessions().await.unwrap();
    view.select_session(8).await.unwrap();

    let reply = view.send("Deadlines").await.unwrap();
    assert_eq!(reply, "Let's plan.");
    assert_eq!(view.messages().len(), 2);
}

#[tokio::test]
async fn test_dashboard_summary() {
    let server = MockServer::start().await;
    mount_sessions(&server).await;
    Mock::given(method("GET"))
        .and(path("/TeamMembers/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "teamname": "Blue", "content": ["ana"]},
            {"id": 2, "teamname": "Green", "content": []}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/Problems/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"content": "Sleep"}])))
        .mount(&server)
        .await;

    let test = client_for(&server, Some(signed_in_tokens())).await;
    let mut view = DashboardView::new(test.api());
    let summary = view.load().await.unwrap();

    assert_eq!(summary.chat_count, 2);
    assert_eq!(summary.team_count, 2);
    assert_eq!(summary.problem_count, 1);
    assert_eq!(summary.latest_session.as_ref().map(|s| s.id), Some(7));
}

#[tokio::test]
async fn test_empty_success_body_is_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register/"))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let test = client_for(&server, None).await;
    test.client
        .register("sam", "sam@example.com", "pw")
        .await
        .unwrap();

    let _: () = test
        .client
        .request(
            "/register/",
            therapy_chat::auth::RequestOptions::post(json!({"username": "x"})),
        )
        .await
        .unwrap();
}
