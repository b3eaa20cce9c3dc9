//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use reqwest::{multipart::Form, Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use vidtube_api::{create_app, create_app_state};
use vidtube_common::AppConfig;

use crate::fixtures::Envelope;

const USERS: &str = "/api/v1/users";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _storage: TempDir,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server on a random port with private upload and
    /// media directories
    pub async fn start() -> Result<Self> {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let storage = tempfile::tempdir()?;
        let mut config = test_config()?;
        config.storage.upload_dir = storage.path().join("temp");
        config.storage.media_dir = storage.path().join("media");
        config.storage.media_base_url = format!("http://{addr}/media");

        let state = create_app_state(config).await?;
        let app = create_app(state)?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            _storage: storage,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn users_url(&self, path: &str) -> String {
        format!("{}{USERS}{path}", self.base_url())
    }

    /// GET a root path such as `/health`
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// GET an absolute URL
    pub async fn get_url(&self, url: &str) -> Result<Response> {
        Ok(self.client.get(url).send().await?)
    }

    /// GET a user route with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.users_url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// POST JSON to a user route
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.users_url(path)).json(body).send().await?)
    }

    /// POST JSON to a user route with auth token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .post(self.users_url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// POST a multipart form to a user route
    pub async fn post_multipart(&self, path: &str, form: Form) -> Result<Response> {
        Ok(self
            .client
            .post(self.users_url(path))
            .multipart(form)
            .send()
            .await?)
    }

    /// PATCH JSON to a user route with auth token
    pub async fn patch_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .patch(self.users_url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// PATCH a multipart form to a user route with auth token
    pub async fn patch_multipart(&self, path: &str, token: &str, form: Form) -> Result<Response> {
        Ok(self
            .client
            .patch(self.users_url(path))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?)
    }
}

/// Create a test configuration
///
/// `DATABASE_URL` must come from the environment; everything else falls back
/// to test defaults.
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_lookup(|key| {
        std::env::var(key).ok().or_else(|| {
            match key {
                "API_PORT" => Some("0"),
                "ACCESS_TOKEN_SECRET" => Some("integration-access-secret"),
                "REFRESH_TOKEN_SECRET" => Some("integration-refresh-secret"),
                "RATE_LIMIT_BURST" => Some("1000"),
                "RATE_LIMIT_REQUESTS_PER_SECOND" => Some("1000"),
                _ => None,
            }
            .map(str::to_string)
        })
    })
    .map_err(|e| anyhow::anyhow!("Config error: {e}"))?;

    Ok(config)
}

/// Helper to check if test environment is available
pub async fn check_test_env() -> bool {
    dotenvy::dotenv().ok();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }
    true
}

/// Assert response status and parse the `data` of the success envelope
pub async fn assert_data<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let envelope: Envelope<T> = assert_json(response, expected_status).await?;
    anyhow::ensure!(envelope.success, "envelope reports failure: {}", envelope.message);
    Ok(envelope.data)
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
