//! Test helpers for integration tests
//!
//! Spawns a test server and wraps the HTTP calls the tests make.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use mentor_api::{create_app, AppState};
use mentor_common::AppConfig;
use mentor_core::{UserId, WeekdayRandomPolicy};
use mentor_db::seed::seed_directory;
use mentor_db::{MemoryAppointmentRepository, MemoryAvailabilityRepository, MemoryUserDirectory};
use mentor_service::ServiceContext;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{Cast, ErrorEnvelope};

const USER_ID_HEADER: &str = "x-user-id";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub cast: Cast,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server with the demo cast and generated availability
    pub async fn start() -> Result<Self> {
        let cast = Cast::demo();
        let config = test_config()?;

        let availability = Arc::new(MemoryAvailabilityRepository::new());
        let context = ServiceContext::builder()
            .user_directory(Arc::new(MemoryUserDirectory::from_users(cast.users())))
            .appointment_repo(Arc::new(MemoryAppointmentRepository::new()))
            .availability_repo(availability.clone())
            .availability_policy(Arc::new(WeekdayRandomPolicy::new(config.scheduling.rules())))
            .build()?;
        seed_directory(
            &cast.users(),
            availability.as_ref(),
            context.availability_policy(),
            context.clock().today(),
        )
        .await?;

        let app = create_app(AppState::new(context, config))?;

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            cast,
            _handle: handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    fn as_user(builder: RequestBuilder, user: Option<UserId>) -> RequestBuilder {
        match user {
            Some(id) => builder.header(USER_ID_HEADER, id.to_string()),
            None => builder,
        }
    }

    /// Anonymous GET
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// GET as `user`
    pub async fn get_as(&self, path: &str, user: UserId) -> Result<Response> {
        let request = Self::as_user(self.client.get(self.url(path)), Some(user));
        Ok(request.send().await?)
    }

    /// POST with a JSON body, optionally as a user
    pub async fn post_as<T: Serialize>(
        &self,
        path: &str,
        user: Option<UserId>,
        body: &T,
    ) -> Result<Response> {
        let request = Self::as_user(self.client.post(self.url(path)), user).json(body);
        Ok(request.send().await?)
    }

    /// POST without a body, as `user`
    pub async fn action_as(&self, path: &str, user: UserId) -> Result<Response> {
        let request = Self::as_user(self.client.post(self.url(path)), Some(user));
        Ok(request.send().await?)
    }

    /// DELETE as `user`
    pub async fn delete_as(&self, path: &str, user: UserId) -> Result<Response> {
        let request = Self::as_user(self.client.delete(self.url(path)), Some(user));
        Ok(request.send().await?)
    }
}

/// In-memory configuration with a rate limit no test will reach
pub fn test_config() -> Result<AppConfig> {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("STORAGE_BACKEND", "memory"),
        ("SEED_DEMO_DATA", "false"),
        ("RATE_LIMIT_REQUESTS_PER_SECOND", "10000"),
        ("RATE_LIMIT_BURST", "10000"),
    ]);
    AppConfig::from_lookup(|key| vars.get(key).map(ToString::to_string))
        .context("building test config")
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

/// Assert an error response and return its code
pub async fn assert_error(response: Response, expected_status: StatusCode) -> Result<String> {
    let envelope: ErrorEnvelope = assert_json(response, expected_status).await?;
    Ok(envelope.error.code)
}
