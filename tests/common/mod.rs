#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use securevpn_api::api::{self, AppState};
use securevpn_api::config::AppConfig;
use securevpn_api::testing::MemoryStore;

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub store: Arc<MemoryStore>,
    pub client: reqwest::Client,
}

impl TestServer {
    async fn spawn(store: MemoryStore) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(store);
        let app = api::router(AppState::new(store.clone(), Arc::new(AppConfig::development())));
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let server = Self {
            port,
            base_url,
            store,
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline { break; }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST a JSON body, returning status and decoded body
    pub async fn post(&self, path: &str, body: Value) -> Result<(StatusCode, Value)> {
        let res = self.client.post(self.url(path)).json(&body).send().await?;
        let status = res.status();
        Ok((status, res.json().await?))
    }

    pub async fn get(&self, path: &str) -> Result<(StatusCode, Value)> {
        let res = self.client.get(self.url(path)).send().await?;
        let status = res.status();
        Ok((status, res.json().await?))
    }

    /// Registers an account and returns its id
    pub async fn register(&self, email: &str, password: &str) -> Result<i64> {
        let (status, body) = self
            .post(
                "/vpn-auth",
                json!({ "action": "register", "email": email, "password": password }),
            )
            .await?;
        anyhow::ensure!(status == StatusCode::CREATED, "register failed: {} {}", status, body);
        body["user"]["id"].as_i64().context("user id missing")
    }

    pub async fn connect(&self, user_id: i64, server_id: i64) -> Result<(StatusCode, Value)> {
        self.post(
            "/vpn-connect",
            json!({ "action": "connect", "userId": user_id, "serverId": server_id }),
        )
        .await
    }

    pub async fn disconnect(
        &self,
        connection_id: i64,
        user_id: i64,
    ) -> Result<(StatusCode, Value)> {
        self.post(
            "/vpn-connect",
            json!({ "action": "disconnect", "connectionId": connection_id, "userId": user_id }),
        )
        .await
    }

    pub async fn logs(&self, user_id: i64) -> Result<Vec<Value>> {
        let (status, body) = self.get(&format!("/vpn-logs?userId={}", user_id)).await?;
        anyhow::ensure!(status == StatusCode::OK, "logs failed: {} {}", status, body);
        Ok(body["logs"].as_array().cloned().unwrap_or_default())
    }
}

/// Server over a store seeded with the stock locations
pub async fn spawn_server() -> Result<TestServer> {
    TestServer::spawn(MemoryStore::with_default_servers()).await
}

pub async fn spawn_server_with(store: MemoryStore) -> Result<TestServer> {
    TestServer::spawn(store).await
}
