//! Integration tests for space, activity and error relay.

mod helpers;

use helpers::CannedReply;
use http::StatusCode;

#[tokio::test]
async fn test_list_spaces_relays_backend_json() {
    let app = helpers::TestApp::new().await;
    let spaces = serde_json::json!([
        { "id": "s1", "name": "Docs", "adminEmail": "ann@example.com" }
    ]);
    app.backend
        .reply("GET", "/api/spaces", CannedReply::json(200, spaces.clone()));
    let token = app.session_for("ann@example.com");

    let response = app.request("GET", "/api/spaces", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, spaces);
    let call = app.backend.only_call();
    assert_eq!(call.method, "GET");
    assert_eq!(call.path, "/api/spaces");
}

#[tokio::test]
async fn test_create_space_answers_201_and_forwards_body() {
    let app = helpers::TestApp::new().await;
    app.backend.reply(
        "POST",
        "/api/spaces",
        CannedReply::json(201, serde_json::json!({ "id": "s9", "name": "Docs" })),
    );
    let token = app.session_for("ann@example.com");
    let body = serde_json::json!({ "name": "Docs", "description": "Team docs" });

    let response = app
        .request("POST", "/api/spaces", Some(body.clone()), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["id"], "s9");
    let call = app.backend.only_call();
    assert_eq!(call.json(), body);
    assert_eq!(call.content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn test_backend_failure_is_relayed_verbatim() {
    let app = helpers::TestApp::new().await;
    app.backend.reply(
        "GET",
        "/api/spaces/s1",
        CannedReply::typed(403, "text/plain", b"Forbidden: not a member"),
    );
    let token = app.session_for("eve@example.com");

    let response = app
        .request("GET", "/api/spaces/s1", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(&response.raw[..], b"Forbidden: not a member");
    assert_eq!(response.header("content-type"), Some("text/plain"));
}

#[tokio::test]
async fn test_backend_json_error_is_relayed_verbatim() {
    let app = helpers::TestApp::new().await;
    let error = serde_json::json!({ "error": "Space not found", "code": 404 });
    app.backend
        .reply("PUT", "/api/spaces/s1", CannedReply::json(404, error.clone()));
    let token = app.session_for("ann@example.com");

    let response = app
        .request(
            "PUT",
            "/api/spaces/s1",
            Some(serde_json::json!({ "name": "New" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, error);
    assert_eq!(app.backend.only_call().json(), serde_json::json!({ "name": "New" }));
}

#[tokio::test]
async fn test_empty_success_body_becomes_empty_object() {
    let app = helpers::TestApp::new().await;
    app.backend
        .reply("DELETE", "/api/spaces/s1", CannedReply::bare(204, b""));
    let token = app.session_for("ann@example.com");

    let response = app
        .request("DELETE", "/api/spaces/s1", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, serde_json::json!({}));
}

#[tokio::test]
async fn test_malformed_json_is_rejected_before_forwarding() {
    let app = helpers::TestApp::new().await;
    let token = app.session_for("ann@example.com");

    let req = http::Request::builder()
        .method("POST")
        .uri("/api/spaces")
        .header("Content-Type", "application/json")
        .header("Cookie", app.cookie(&token))
        .body(axum::body::Body::from("{\"name\": "))
        .unwrap();
    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].is_string());
    assert!(app.backend.calls().is_empty());
}

#[tokio::test]
async fn test_unreachable_backend_is_500_with_action() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let closed = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let app = helpers::TestApp::with_config(move |c| c.backend.url = closed).await;
    let token = app.session_for("ann@example.com");

    let response = app.request("GET", "/api/spaces", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = response.body["error"].as_str().expect("error message");
    assert!(message.starts_with("Failed to fetch spaces: "), "{message}");
}

#[tokio::test]
async fn test_activity_is_forwarded() {
    let app = helpers::TestApp::new().await;
    let entries = serde_json::json!([
        { "id": "a1", "userEmail": "ann@example.com", "action": "UPLOAD_FILE",
          "details": "notes.txt", "timestamp": "2025-02-10T12:00:00" }
    ]);
    app.backend.reply(
        "GET",
        "/api/spaces/s1/activity",
        CannedReply::json(200, entries.clone()),
    );
    let token = app.session_for("ann@example.com");

    let response = app
        .request("GET", "/api/spaces/s1/activity", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, entries);
}
