//! Integration tests for membership routes.

mod helpers;

use helpers::CannedReply;
use http::StatusCode;

#[tokio::test]
async fn test_add_member_forwards_email() {
    let app = helpers::TestApp::new().await;
    let token = app.session_for("owner@example.com");

    let response = app
        .request(
            "POST",
            "/api/spaces/s1/members",
            Some(serde_json::json!({ "email": "ann@example.com" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let call = app.backend.only_call();
    assert_eq!(call.method, "POST");
    assert_eq!(call.path, "/api/spaces/s1/members");
    assert_eq!(call.json(), serde_json::json!({ "email": "ann@example.com" }));
}

#[tokio::test]
async fn test_member_email_is_encoded_for_backend() {
    let app = helpers::TestApp::new().await;
    let token = app.session_for("owner@example.com");

    let response = app
        .request(
            "PUT",
            "/api/spaces/s1/members/ann%2Bops%40example.com",
            Some(serde_json::json!({ "role": "ADMIN" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let call = app.backend.only_call();
    assert_eq!(call.method, "PUT");
    assert_eq!(call.path, "/api/spaces/s1/members/ann%2Bops%40example.com");
    assert_eq!(call.json(), serde_json::json!({ "role": "ADMIN" }));
}

#[tokio::test]
async fn test_unencoded_email_is_encoded_too() {
    let app = helpers::TestApp::new().await;
    let token = app.session_for("owner@example.com");

    let response = app
        .request(
            "DELETE",
            "/api/spaces/s1/members/bob@example.com",
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        app.backend.only_call().path,
        "/api/spaces/s1/members/bob%40example.com"
    );
}

#[tokio::test]
async fn test_remove_owner_refusal_is_relayed() {
    let app = helpers::TestApp::new().await;
    let error = serde_json::json!({ "error": "Cannot remove the space owner" });
    app.backend.reply(
        "DELETE",
        "/api/spaces/s1/members/owner%40example.com",
        CannedReply::json(400, error.clone()),
    );
    let token = app.session_for("owner@example.com");

    let response = app
        .request(
            "DELETE",
            "/api/spaces/s1/members/owner%40example.com",
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, error);
}

#[tokio::test]
async fn test_role_change_requires_json_object() {
    let app = helpers::TestApp::new().await;
    let token = app.session_for("owner@example.com");

    let response = app
        .request(
            "PUT",
            "/api/spaces/s1/members/ann%40example.com",
            Some(serde_json::json!("ADMIN")),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.backend.calls().is_empty());
}
