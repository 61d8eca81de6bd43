//! Server-wide behaviour: error redaction, limits, health checks and shutdown.

mod common;

use common::{seed_folders, spawn_app, spawn_app_with};
use notes_api::config::RunMode;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

async fn break_notes_table(pool: &sqlx::SqlitePool) {
    sqlx::query("DROP TABLE notes").execute(pool).await.unwrap();
}

#[tokio::test]
async fn production_hides_server_error_detail() {
    let app = spawn_app_with(|config| config.mode = RunMode::Production).await;
    break_notes_table(&app.pool).await;

    let resp = app.http.get(app.url("/notes")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({ "error": { "message": "server error" } })
    );
}

#[tokio::test]
async fn development_shows_server_error_detail() {
    let app = spawn_app_with(|config| config.mode = RunMode::Development).await;
    break_notes_table(&app.pool).await;

    let resp = app.http.get(app.url("/notes")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = resp.json().await.unwrap();
    let message = body["error"]["message"].as_str().unwrap();
    assert_ne!(message, "server error");
    assert!(message.contains("no such table"), "{}", message);
}

#[tokio::test]
async fn production_keeps_client_error_messages() {
    let app = spawn_app_with(|config| config.mode = RunMode::Production).await;

    let resp = app.http.get(app.url("/folders/1")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({ "error": { "message": "Folder doesn't exist" } })
    );
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let app = spawn_app_with(|config| config.security.max_body_size = 64).await;

    let resp = app
        .http
        .post(app.url("/folders"))
        .json(&json!({ "name": "x".repeat(256) }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(resp.headers()["content-type"], "application/json");

    let body: Value = resp.json().await.unwrap();
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("length limit exceeded"));
    assert!(app.api.list_folders().await.unwrap().is_empty());
}

#[tokio::test]
async fn oversized_chunked_body_is_rejected_the_same_way() {
    let app = spawn_app_with(|config| config.security.max_body_size = 64).await;
    let payload = json!({ "name": "x".repeat(256) }).to_string();

    let request = format!(
        "POST /folders HTTP/1.1\r\n\
         Host: {addr}\r\n\
         Content-Type: application/json\r\n\
         Transfer-Encoding: chunked\r\n\
         Connection: close\r\n\
         \r\n\
         {len:x}\r\n{payload}\r\n0\r\n\r\n",
        addr = app.addr,
        len = payload.len(),
        payload = payload,
    );

    let mut stream = TcpStream::connect(app.addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();

    assert!(response.starts_with("HTTP/1.1 413"), "{}", response);
    assert!(
        response.contains(r#"{"error":{"message":"#),
        "{}",
        response
    );
    assert!(app.api.list_folders().await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_path_and_wrong_method_use_error_body() {
    let app = spawn_app().await;

    let resp = app.http.get(app.url("/nope")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({ "error": { "message": "Route doesn't exist" } })
    );

    let resp = app.http.put(app.url("/notes")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        resp.json::<Value>().await.unwrap(),
        json!({ "error": { "message": "Method not allowed" } })
    );
}

#[tokio::test]
async fn root_and_health_respond() {
    let app = spawn_app().await;

    let resp = app.http.get(app.url("/")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "Hello, world!");

    let resp = app.http.get(app.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    assert_eq!(resp.json::<Value>().await.unwrap(), json!({ "status": "ok" }));
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let app = spawn_app().await;
    seed_folders(&app.pool, &["Important"]).await;

    let resp = app.http.get(app.url("/folders")).send().await.unwrap();
    assert_eq!(resp.headers()["x-content-type-options"], "nosniff");
    assert_eq!(resp.headers()["x-frame-options"], "DENY");
}

#[tokio::test]
async fn server_stops_on_shutdown() {
    let app = spawn_app().await;
    let url = app.url("/");
    let http = app.http.clone();

    assert!(http.get(&url).send().await.is_ok());
    drop(app);

    let mut stopped = false;
    for _ in 0..50 {
        if http.get(&url).send().await.is_err() {
            stopped = true;
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    assert!(stopped, "server still accepting connections after shutdown");
}
