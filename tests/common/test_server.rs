use std::path::Path;
use std::sync::Arc;

use antiquarian::server::{AppState, create_router};
use antiquarian::store::{SqliteStore, Store};
use serde_json::Value;
use tempfile::TempDir;
use tokio::task::JoinHandle;

/// Router served in-process on an ephemeral port over a fresh database.
pub struct TestServer {
    pub temp_dir: TempDir,
    pub base_url: String,
    client: reqwest::Client,
    server_task: Option<JoinHandle<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let store = SqliteStore::new(temp_dir.path().join("antiquarian.db")).expect("open store");
        store.initialize().expect("initialize schema");

        let app = create_router(Arc::new(AppState::new(Arc::new(store))));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let port = listener.local_addr().expect("local addr").port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let server_task = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        Self::wait_for_ready(&base_url).await;

        Self {
            temp_dir,
            base_url,
            client: reqwest::Client::new(),
            server_task: Some(server_task),
        }
    }

    async fn wait_for_ready(base_url: &str) {
        let client = reqwest::Client::new();
        for _ in 0..50 {
            if client
                .get(format!("{}/health", base_url))
                .send()
                .await
                .is_ok()
            {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        panic!("Server did not become ready");
    }

    pub fn data_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Calls a query procedure, returning the status and the decoded envelope.
    pub async fn query(&self, procedure: &str, input: Option<Value>) -> (u16, Value) {
        let mut request = self
            .client
            .get(format!("{}/trpc/{}", self.base_url, procedure));
        if let Some(input) = input {
            request = request.query(&[("input", input.to_string())]);
        }
        let response = request.send().await.expect("send query");
        let status = response.status().as_u16();
        (status, response.json().await.expect("parse query response"))
    }

    /// Calls a mutation procedure with a JSON body.
    pub async fn mutate(&self, procedure: &str, input: Value) -> (u16, Value) {
        let response = self
            .client
            .post(format!("{}/trpc/{}", self.base_url, procedure))
            .json(&input)
            .send()
            .await
            .expect("send mutation");
        let status = response.status().as_u16();
        (status, response.json().await.expect("parse mutation response"))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(task) = self.server_task.take() {
            task.abort();
        }
    }
}
