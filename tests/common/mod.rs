//! Shared utilities for integration testing.

use std::net::SocketAddr;

use notes_api::client::ApiClient;
use notes_api::config::{AppConfig, DatabaseConfig, RunMode};
use notes_api::lifecycle::Shutdown;
use notes_api::store;
use notes_api::HttpServer;
use sqlx::SqlitePool;
use tokio::net::TcpListener;

/// A running server on an ephemeral port backed by a private in-memory database.
///
/// The server is stopped when this value is dropped.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: SqlitePool,
    pub http: reqwest::Client,
    pub api: ApiClient,
    shutdown: Shutdown,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

#[allow(dead_code)]
pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

pub async fn spawn_app_with<F>(customize: F) -> TestApp
where
    F: FnOnce(&mut AppConfig),
{
    let mut config = AppConfig {
        mode: RunMode::Test,
        database: DatabaseConfig::in_memory(),
        ..AppConfig::default()
    };
    customize(&mut config);

    let pool = store::connect(&config.database).await.unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, pool.clone());
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    let http = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();
    let api = ApiClient::with_client(http.clone(), &format!("http://{}", addr));

    TestApp {
        addr,
        pool,
        http,
        api,
        shutdown,
    }
}

/// Insert folders directly into the store, returning their ids in order.
#[allow(dead_code)]
pub async fn seed_folders(pool: &SqlitePool, names: &[&str]) -> Vec<i64> {
    let mut ids = Vec::new();
    for name in names {
        let id: i64 = sqlx::query_scalar("INSERT INTO folders (name) VALUES (?) RETURNING id")
            .bind(name)
            .fetch_one(pool)
            .await
            .unwrap();
        ids.push(id);
    }
    ids
}

/// Insert a note directly into the store.
#[allow(dead_code)]
pub async fn seed_note(pool: &SqlitePool, title: &str, content: &str, folder_id: i64) -> i64 {
    seed_note_at(pool, title, content, folder_id, chrono::Utc::now()).await
}

/// Insert a note with a fixed `modified` timestamp.
#[allow(dead_code)]
pub async fn seed_note_at(
    pool: &SqlitePool,
    title: &str,
    content: &str,
    folder_id: i64,
    modified: chrono::DateTime<chrono::Utc>,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO notes (title, content, folder_id, modified) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(title)
    .bind(content)
    .bind(folder_id)
    .bind(modified)
    .fetch_one(pool)
    .await
    .unwrap()
}
