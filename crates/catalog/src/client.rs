//! HTTP client for the remote catalog backend
//!
//! A thin JSON wrapper over reqwest shared by the remote record store and the
//! remote identity provider. Every request is bounded by the configured
//! timeout and non-success statuses are mapped onto [`CatalogError`]. Once a
//! session token is attached it goes out as a bearer header on every request.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::error::{CatalogError, Result};

/// Configuration for the backend HTTP client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
  /// Base URL of the catalog backend (e.g., "http://localhost:3000")
  pub base_url: String,
  /// Request timeout in seconds
  pub timeout_secs: u64,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self { base_url: "http://localhost:3000".to_string(), timeout_secs: 30 }
  }
}

#[derive(Clone)]
pub struct BackendClient {
  client: Client,
  config: ClientConfig,
  token: Option<String>,
}

impl fmt::Debug for BackendClient {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("BackendClient")
      .field("config", &self.config)
      .field("token", &self.token.as_ref().map(|_| "<redacted>"))
      .finish()
  }
}

impl BackendClient {
  pub fn with_config(config: ClientConfig) -> Result<Self> {
    let client = Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;
    Ok(Self { client, config, token: None })
  }

  /// Send `token` as `Authorization: Bearer` from now on.
  pub fn with_token(mut self, token: Option<String>) -> Self {
    self.token = token;
    self
  }

  pub fn has_token(&self) -> bool {
    self.token.is_some()
  }

  pub fn base_url(&self) -> &str {
    &self.config.base_url
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  fn request(&self, method: Method, path: &str) -> RequestBuilder {
    let request = self.client.request(method, self.url(path));
    match &self.token {
      Some(token) => request.bearer_auth(token),
      None => request,
    }
  }

  pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
    let response = self.send(Method::GET, path, |request| request).await?;
    Ok(response.json().await?)
  }

  pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
  where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
  {
    let response = self.send(Method::POST, path, |request| request.json(body)).await?;
    Ok(response.json().await?)
  }

  pub async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T>
  where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
  {
    let response = self.send(Method::PUT, path, |request| request.json(body)).await?;
    Ok(response.json().await?)
  }

  /// POST with no response body of interest.
  pub async fn post_empty(&self, path: &str) -> Result<()> {
    self.send(Method::POST, path, |request| request).await?;
    Ok(())
  }

  pub async fn delete(&self, path: &str) -> Result<()> {
    self.send(Method::DELETE, path, |request| request).await?;
    Ok(())
  }

  async fn send(
    &self,
    method: Method,
    path: &str,
    build: impl FnOnce(RequestBuilder) -> RequestBuilder,
  ) -> Result<Response> {
    let secs = self.config.timeout_secs;
    debug!("{method} {path}");
    let request = build(self.request(method.clone(), path));

    let response = timeout(Duration::from_secs(secs), request.send())
      .await
      .map_err(|_| CatalogError::Timeout { secs })??;

    let status = response.status();
    if status.is_success() {
      return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!("{method} {path} failed with {status}");
    Err(status_error(status, method.as_str(), path, body))
  }
}

fn status_error(status: StatusCode, method: &str, path: &str, body: String) -> CatalogError {
  match status {
    StatusCode::UNAUTHORIZED => CatalogError::InvalidCredentials,
    StatusCode::FORBIDDEN => CatalogError::permission_denied(format!("{method} {path}")),
    _ => {
      let message = match body.trim() {
        "" => status.canonical_reason().unwrap_or("unknown error").to_string(),
        text => text.to_string(),
      };
      CatalogError::backend(status.as_u16(), message)
    }
  }
}
