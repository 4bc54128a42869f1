//! Integration tests for file listing, upload, download and delete.

mod helpers;

use axum::body::Body;
use helpers::CannedReply;
use http::StatusCode;

const BOUNDARY: &str = "----spaces-test-boundary";

fn multipart_body(parts: &[(&str, Option<&str>, &str)]) -> String {
    let mut body = String::new();
    for (name, file_name, content) in parts {
        body.push_str(&format!("--{BOUNDARY}\r\n"));
        match file_name {
            Some(file_name) => {
                body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n"
                ));
                body.push_str("Content-Type: text/plain\r\n\r\n");
            }
            None => {
                body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                ));
            }
        }
        body.push_str(content);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));
    body
}

fn upload_request(app: &helpers::TestApp, token: &str, body: String) -> http::Request<Body> {
    http::Request::builder()
        .method("POST")
        .uri("/api/spaces/s1/files")
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header("Cookie", app.cookie(token))
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_list_files_is_forwarded() {
    let app = helpers::TestApp::new().await;
    let files = serde_json::json!([
        { "id": "f1", "originalFilename": "notes.txt", "size": 12,
          "uploaderEmail": "ann@example.com", "uploadedAt": "2025-02-10T12:00:00" }
    ]);
    app.backend.reply(
        "GET",
        "/api/spaces/s1/files",
        CannedReply::json(200, files.clone()),
    );
    let token = app.session_for("ann@example.com");

    let response = app
        .request("GET", "/api/spaces/s1/files", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, files);
}

#[tokio::test]
async fn test_upload_rebuilds_multipart_with_file_field() {
    let app = helpers::TestApp::new().await;
    app.backend.reply(
        "POST",
        "/api/spaces/s1/files",
        CannedReply::json(201, serde_json::json!({ "id": "f7" })),
    );
    let token = app.session_for("ann@example.com");

    let body = multipart_body(&[
        ("file", Some("notes.txt"), "hello backend"),
        ("comment", None, "first draft"),
    ]);
    let response = app.send(upload_request(&app, &token, body)).await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["id"], "f7");

    let call = app.backend.only_call();
    assert_eq!(call.method, "POST");
    let content_type = call.content_type.expect("content type");
    assert!(content_type.starts_with("multipart/form-data; boundary="));
    assert!(!content_type.contains(BOUNDARY));

    let forwarded = String::from_utf8_lossy(&call.body);
    assert!(forwarded.contains("name=\"file\"; filename=\"notes.txt\""));
    assert!(forwarded.contains("hello backend"));
    assert!(forwarded.contains("name=\"comment\""));
    assert!(forwarded.contains("first draft"));
}

#[tokio::test]
async fn test_upload_without_file_field_is_rejected() {
    let app = helpers::TestApp::new().await;
    let token = app.session_for("ann@example.com");

    let body = multipart_body(&[("comment", None, "no file here")]);
    let response = app.send(upload_request(&app, &token, body)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["error"].is_string());
    assert!(app.backend.calls().is_empty());
}

#[tokio::test]
async fn test_upload_requires_multipart() {
    let app = helpers::TestApp::new().await;
    let token = app.session_for("ann@example.com");

    let response = app
        .request(
            "POST",
            "/api/spaces/s1/files",
            Some(serde_json::json!({ "file": "nope" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.backend.calls().is_empty());
}

#[tokio::test]
async fn test_download_relays_content_headers() {
    let app = helpers::TestApp::new().await;
    app.backend.reply(
        "GET",
        "/api/files/f1",
        CannedReply::typed(200, "application/pdf", b"%PDF-1.7 bytes")
            .with_header("content-disposition", "attachment; filename=\"report.pdf\""),
    );
    let token = app.session_for("ann@example.com");

    let response = app
        .request("GET", "/api/files/f1", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("content-type"), Some("application/pdf"));
    assert_eq!(
        response.header("content-disposition"),
        Some("attachment; filename=\"report.pdf\"")
    );
    assert_eq!(&response.raw[..], b"%PDF-1.7 bytes");
}

#[tokio::test]
async fn test_download_keeps_non_ascii_file_name() {
    let app = helpers::TestApp::new().await;
    let disposition = "attachment; filename=\"résumé.pdf\"";
    app.backend.reply(
        "GET",
        "/api/files/f3",
        CannedReply::typed(200, "application/pdf", b"%PDF")
            .with_header("content-disposition", disposition),
    );
    let token = app.session_for("ann@example.com");

    let response = app
        .request("GET", "/api/files/f3", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.raw_header("content-disposition"),
        Some(disposition.as_bytes())
    );
    assert_eq!(&response.raw[..], b"%PDF");
}

#[tokio::test]
async fn test_download_defaults_content_headers() {
    let app = helpers::TestApp::new().await;
    app.backend
        .reply("GET", "/api/files/f2", CannedReply::bare(200, b"\x00\x01\x02"));
    let token = app.session_for("ann@example.com");

    let response = app
        .request("GET", "/api/files/f2", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.header("content-type"),
        Some("application/octet-stream")
    );
    assert_eq!(response.header("content-disposition"), Some(""));
    assert_eq!(&response.raw[..], b"\x00\x01\x02");
}

#[tokio::test]
async fn test_download_failure_is_relayed() {
    let app = helpers::TestApp::new().await;
    app.backend.reply(
        "GET",
        "/api/files/missing",
        CannedReply::json(404, serde_json::json!({ "error": "File not found" })),
    );
    let token = app.session_for("ann@example.com");

    let response = app
        .request("GET", "/api/files/missing", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "File not found");
}

#[tokio::test]
async fn test_delete_file_relays_body_and_type() {
    let app = helpers::TestApp::new().await;
    app.backend.reply(
        "DELETE",
        "/api/files/f1",
        CannedReply::json(200, serde_json::json!({ "deleted": true })),
    );
    let token = app.session_for("ann@example.com");

    let response = app
        .request("DELETE", "/api/files/f1", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("content-type"), Some("application/json"));
    assert_eq!(response.body, serde_json::json!({ "deleted": true }));
    assert!(response.header("content-disposition").is_none());
}
