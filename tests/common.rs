//! Shared harness for HTTP integration tests.
//!
//! [`TestHost`] runs the real router on an ephemeral port with its data
//! directory in a temp dir, and wraps a `reqwest` client pointed at it.

#![allow(dead_code)]

use std::time::Duration;

use anyhow::Result;
use pawshaven::config::{BackendKind, Config};
use pawshaven::http::{AppState, router};
use reqwest::{Client, Response};
use serde_json::Value;
use tempfile::TempDir;

pub const ADMIN_KEY: &str = "testkey";

pub struct TestHost {
    base: String,
    client: Client,
    data_dir: TempDir,
}

pub struct TestHostBuilder {
    admin_key: Option<String>,
    backend: BackendKind,
}

impl TestHostBuilder {
    pub fn with_admin_key(mut self, key: &str) -> Self {
        self.admin_key = Some(key.to_string());
        self
    }

    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    pub async fn start(self) -> Result<TestHost> {
        let data_dir = TempDir::new()?;
        let config = Config {
            backend: self.backend,
            data_dir: data_dir.path().to_path_buf(),
            admin_api_key: self.admin_key,
            ..Config::default()
        };
        let app = router(AppState::from_config(&config)?, Duration::from_secs(30));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(TestHost {
            base: format!("http://{addr}"),
            client: Client::new(),
            data_dir,
        })
    }
}

impl TestHost {
    pub fn builder() -> TestHostBuilder {
        TestHostBuilder {
            admin_key: None,
            backend: BackendKind::File,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    pub fn data_path(&self, file: &str) -> std::path::PathBuf {
        self.data_dir.path().join(file)
    }

    pub async fn get(&self, path: &str) -> reqwest::Result<Response> {
        self.client.get(self.url(path)).send().await
    }

    pub async fn post_json(&self, path: &str, body: &Value, key: Option<&str>) -> reqwest::Result<Response> {
        let mut request = self.client.post(self.url(path)).json(body);
        if let Some(key) = key {
            request = request.header("x-api-key", key);
        }
        request.send().await
    }

    pub async fn delete(&self, path: &str, key: Option<&str>) -> reqwest::Result<Response> {
        let mut request = self.client.delete(self.url(path));
        if let Some(key) = key {
            request = request.header("x-api-key", key);
        }
        request.send().await
    }
}
