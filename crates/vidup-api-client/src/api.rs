//! Domain methods for the upload API client.
//!
//! Endpoint paths are relative to the configured API root, except the signed
//! storage URL which is used verbatim.

use std::time::Instant;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use serde_json::Value as JsonValue;
use tokio_util::io::ReaderStream;
use vidup_core::models::{
    ConversionJob, DownloadUrl, JobStatus, JobStatusRequest, SelectedFile, SignedUpload,
    SignedUrlRequest, VideoKeyRequest,
};
use vidup_core::{ProgressCallback, TransferProgress, VideoPipeline, WorkflowResult};

use crate::{ensure_success, transport_error, ApiClient};

pub const GENERATE_SIGNED_URL_PATH: &str = "/generate-signed-url";
pub const TRIGGER_HLS_CONVERSION_PATH: &str = "/trigger-hls-conversion";
pub const JOB_STATUS_PATH: &str = "/job-status";
pub const GENERATE_DOWNLOAD_URL_PATH: &str = "/generate-download-url";

/// Read size for the upload body; one progress event per chunk.
const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

impl ApiClient {
    /// Request a signed upload URL and storage key for `file`.
    pub async fn generate_signed_url(&self, file: &SelectedFile) -> WorkflowResult<SignedUpload> {
        tracing::debug!(filename = %file.name, content_type = %file.content_type, "Requesting signed upload URL");

        let body = SignedUrlRequest {
            filename: file.name.clone(),
            content_type: file.content_type.clone(),
        };
        let signed: SignedUpload = self.post_json(GENERATE_SIGNED_URL_PATH, &body).await?;
        let signed = signed.validate()?;

        tracing::info!(filename = %file.name, key = %signed.key, "Signed upload URL issued");
        Ok(signed)
    }

    /// Stream the file to a signed storage URL with PUT.
    ///
    /// `Content-Type` is the file's MIME type and `Content-Length` its size on
    /// disk. `on_progress` fires once per chunk handed to the transport.
    pub async fn upload_to_signed_url(
        &self,
        signed_url: &str,
        file: &SelectedFile,
        on_progress: ProgressCallback,
    ) -> WorkflowResult<()> {
        let start = Instant::now();
        let handle = tokio::fs::File::open(file.path()).await?;
        let total = handle.metadata().await?.len();

        tracing::debug!(filename = %file.name, bytes = total, "Uploading to signed URL");

        let mut loaded: u64 = 0;
        let stream = ReaderStream::with_capacity(handle, UPLOAD_CHUNK_SIZE).map(move |chunk| {
            if let Ok(bytes) = &chunk {
                loaded += bytes.len() as u64;
                on_progress(TransferProgress::new(loaded, total));
            }
            chunk
        });

        let response = self
            .client()
            .put(signed_url)
            .header(CONTENT_TYPE, file.content_type.as_str())
            .header(CONTENT_LENGTH, total)
            .body(reqwest::Body::wrap_stream(stream))
            .send()
            .await
            .map_err(transport_error)?;
        ensure_success(response).await?;

        tracing::info!(
            filename = %file.name,
            bytes = total,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Upload to signed URL complete"
        );
        Ok(())
    }

    /// Start HLS conversion of an uploaded object.
    pub async fn trigger_hls_conversion(&self, key: &str) -> WorkflowResult<ConversionJob> {
        tracing::debug!(key = %key, "Triggering HLS conversion");

        let body = VideoKeyRequest {
            key: key.to_string(),
        };
        let job: ConversionJob = self.post_json(TRIGGER_HLS_CONVERSION_PATH, &body).await?;
        let job = job.validate()?;

        tracing::info!(key = %key, job_id = %job.job_id, "HLS conversion triggered");
        Ok(job)
    }

    /// Fetch a conversion job's status. Extra payload fields are preserved.
    pub async fn job_status(&self, job_id: &str) -> WorkflowResult<JobStatus> {
        let body = JobStatusRequest {
            job_id: job_id.to_string(),
        };
        let payload: JsonValue = self.post_json(JOB_STATUS_PATH, &body).await?;
        let job = JobStatus::from_payload(payload)?;

        tracing::info!(job_id = %job_id, status = %job.status, "Fetched job status");
        Ok(job)
    }

    /// Request a signed playback URL for an uploaded object.
    pub async fn generate_download_url(&self, key: &str) -> WorkflowResult<DownloadUrl> {
        let body = VideoKeyRequest {
            key: key.to_string(),
        };
        let url: DownloadUrl = self.post_json(GENERATE_DOWNLOAD_URL_PATH, &body).await?;
        let url = url.validate()?;

        tracing::info!(key = %key, "Download URL issued");
        Ok(url)
    }
}

#[async_trait]
impl VideoPipeline for ApiClient {
    async fn generate_signed_url(&self, file: &SelectedFile) -> WorkflowResult<SignedUpload> {
        ApiClient::generate_signed_url(self, file).await
    }

    async fn upload_to_signed_url(
        &self,
        signed_url: &str,
        file: &SelectedFile,
        on_progress: ProgressCallback,
    ) -> WorkflowResult<()> {
        ApiClient::upload_to_signed_url(self, signed_url, file, on_progress).await
    }

    async fn trigger_hls_conversion(&self, key: &str) -> WorkflowResult<ConversionJob> {
        ApiClient::trigger_hls_conversion(self, key).await
    }

    async fn job_status(&self, job_id: &str) -> WorkflowResult<JobStatus> {
        ApiClient::job_status(self, job_id).await
    }

    async fn generate_download_url(&self, key: &str) -> WorkflowResult<DownloadUrl> {
        ApiClient::generate_download_url(self, key).await
    }
}
