//! HTTP client for the video upload backend.
//!
//! Wraps reqwest with JSON POST helpers and maps every failure onto
//! `WorkflowError`. Domain methods live in `api` and back the
//! `VideoPipeline` implementation the front-end drives.

pub mod api;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use vidup_core::{ClientConfig, WorkflowError, WorkflowResult};

/// HTTP client for the transcoding API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> WorkflowResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| WorkflowError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Create client from environment: VIDUP_API_URL (or API_URL), VIDUP_HTTP_TIMEOUT_SECS.
    pub fn from_env() -> WorkflowResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    /// POST JSON body and deserialize response.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> WorkflowResult<T> {
        let url = self.build_url(path);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        read_json(response).await
    }

    /// Raw client for requests outside the API root (signed storage URLs).
    pub fn client(&self) -> &Client {
        &self.client
    }
}

pub(crate) fn transport_error(err: reqwest::Error) -> WorkflowError {
    WorkflowError::Transport(err.to_string())
}

/// Turn a non-2xx response into `WorkflowError::Remote`.
pub(crate) async fn ensure_success(response: Response) -> WorkflowResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(WorkflowError::Remote {
        status: status.as_u16(),
        body,
    })
}

pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> WorkflowResult<T> {
    let response = ensure_success(response).await?;
    let bytes = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&bytes).map_err(|e| {
        WorkflowError::invalid_response(format!("unexpected response body: {}", e))
    })
}

pub use vidup_core::models::{ConversionJob, DownloadUrl, JobStatus, SignedUpload};

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn build_url_uses_configured_root() {
        let client = ApiClient::new(ClientConfig::new("https://api.example.com/").unwrap()).unwrap();
        assert_eq!(client.base_url(), "https://api.example.com");
        assert_eq!(
            client.build_url("/trigger-hls-conversion"),
            "https://api.example.com/trigger-hls-conversion"
        );
    }

    #[test]
    fn accepts_optional_timeout() {
        let config = ClientConfig::new("http://localhost:3000")
            .unwrap()
            .with_timeout(Some(Duration::from_secs(5)));
        assert!(ApiClient::new(config).is_ok());
    }
}
