//! # REST Gateway
//!
//! [`ResourceGateway`] implementation over the remote users API:
//!
//! | operation | request | success status |
//! |-----------|------------------------|-----|
//! | list      | `GET /users`           | 200 |
//! | create    | `POST /users`          | 201 |
//! | update    | `PUT /users/{id}`      | 200 |
//! | delete    | `DELETE /users/{id}`   | 200 |
//!
//! Any other status is a failure; the response body is carried verbatim as
//! the diagnostic. Transport failures (connect errors, timeouts) map to
//! [`GatewayError::Transport`].

use crate::model::{User, UserDraft};
use async_trait::async_trait;
use console_core::{GatewayError, ResourceGateway};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, info};

/// Environment variable naming the API origin.
pub const BASE_URL_ENV: &str = "USERS_API_URL";

/// Fallback origin when [`BASE_URL_ENV`] is unset.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the users resource API.
#[derive(Debug, Clone)]
pub struct RestGateway {
    client: Client,
    base_url: String,
}

impl RestGateway {
    /// Create a gateway against `base_url`.
    ///
    /// The URL is normalized: a missing scheme becomes `http://` and a
    /// trailing slash is trimmed, so "localhost:3000/" works as given.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = normalize(base_url.into());
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        info!(%base_url, "Creating REST gateway");
        Self { client, base_url }
    }

    /// Create a gateway from the [`BASE_URL_ENV`] environment variable,
    /// falling back to [`DEFAULT_BASE_URL`].
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Treat `expected` as the operation's success class; anything else is a
    /// rejection whose body becomes the diagnostic.
    async fn accept(response: Response, expected: StatusCode) -> Result<Response, GatewayError> {
        let status = response.status();
        if status != expected {
            let body = response.text().await.unwrap_or_default();
            debug!(%status, "Gateway rejected request");
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

fn normalize(raw: String) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

fn transport(error: reqwest::Error) -> GatewayError {
    GatewayError::Transport(error.to_string())
}

#[async_trait]
impl ResourceGateway<User> for RestGateway {
    async fn list(&self) -> Result<Vec<User>, GatewayError> {
        let response = self
            .client
            .get(self.url("/users"))
            .send()
            .await
            .map_err(transport)?;
        let response = Self::accept(response, StatusCode::OK).await?;
        response.json().await.map_err(transport)
    }

    async fn create(&self, draft: UserDraft) -> Result<User, GatewayError> {
        let response = self
            .client
            .post(self.url("/users"))
            .json(&draft)
            .send()
            .await
            .map_err(transport)?;
        let response = Self::accept(response, StatusCode::CREATED).await?;
        response.json().await.map_err(transport)
    }

    async fn update(&self, record: User) -> Result<User, GatewayError> {
        let response = self
            .client
            .put(self.url(&format!("/users/{}", record.id)))
            .json(&record)
            .send()
            .await
            .map_err(transport)?;
        let response = Self::accept(response, StatusCode::OK).await?;
        response.json().await.map_err(transport)
    }

    async fn delete(&self, id: String) -> Result<(), GatewayError> {
        let response = self
            .client
            .delete(self.url(&format!("/users/{id}")))
            .send()
            .await
            .map_err(transport)?;
        Self::accept(response, StatusCode::OK).await?;
        Ok(())
    }
}
