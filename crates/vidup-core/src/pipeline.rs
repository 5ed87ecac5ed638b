//! Remote pipeline abstraction
//!
//! The workflow talks to the transcoding backend only through this trait.
//! `vidup-api-client` provides the HTTP implementation.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::WorkflowResult;
use crate::models::{ConversionJob, DownloadUrl, JobStatus, SelectedFile, SignedUpload};
use crate::progress::TransferProgress;

/// Invoked after each chunk of the upload body is handed to the transport.
/// Implementations must return quickly; they run on the transfer path.
pub type ProgressCallback = Box<dyn Fn(TransferProgress) + Send + Sync>;

/// The five remote operations behind the upload workflow.
#[async_trait]
pub trait VideoPipeline: Send + Sync {
    /// Ask the backend for a pre-authorized upload URL and the storage key
    /// the object will live under.
    async fn generate_signed_url(&self, file: &SelectedFile) -> WorkflowResult<SignedUpload>;

    /// PUT the file body to `signed_url`, reporting progress as it goes.
    async fn upload_to_signed_url(
        &self,
        signed_url: &str,
        file: &SelectedFile,
        on_progress: ProgressCallback,
    ) -> WorkflowResult<()>;

    /// Start the HLS transcoding job for an uploaded object.
    async fn trigger_hls_conversion(&self, key: &str) -> WorkflowResult<ConversionJob>;

    /// Fetch the current state of a transcoding job.
    async fn job_status(&self, job_id: &str) -> WorkflowResult<JobStatus>;

    /// Ask for a pre-authorized playback URL for an uploaded object.
    async fn generate_download_url(&self, key: &str) -> WorkflowResult<DownloadUrl>;
}

#[async_trait]
impl<P> VideoPipeline for Arc<P>
where
    P: VideoPipeline + ?Sized,
{
    async fn generate_signed_url(&self, file: &SelectedFile) -> WorkflowResult<SignedUpload> {
        (**self).generate_signed_url(file).await
    }

    async fn upload_to_signed_url(
        &self,
        signed_url: &str,
        file: &SelectedFile,
        on_progress: ProgressCallback,
    ) -> WorkflowResult<()> {
        (**self)
            .upload_to_signed_url(signed_url, file, on_progress)
            .await
    }

    async fn trigger_hls_conversion(&self, key: &str) -> WorkflowResult<ConversionJob> {
        (**self).trigger_hls_conversion(key).await
    }

    async fn job_status(&self, job_id: &str) -> WorkflowResult<JobStatus> {
        (**self).job_status(job_id).await
    }

    async fn generate_download_url(&self, key: &str) -> WorkflowResult<DownloadUrl> {
        (**self).generate_download_url(key).await
    }
}
