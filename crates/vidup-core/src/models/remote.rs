//! Request and response bodies of the remote transcoding API.
//!
//! Field names are camelCase on the wire. Response types validate that the
//! fields the workflow depends on are present and non-empty.

use serde::{Deserialize, Serialize};

use crate::error::{WorkflowError, WorkflowResult};

/// Body of POST /generate-signed-url
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrlRequest {
    pub filename: String,
    pub content_type: String,
}

/// Response of POST /generate-signed-url
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SignedUpload {
    pub signed_url: String,
    pub key: String,
}

/// Body of POST /trigger-hls-conversion and POST /generate-download-url
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VideoKeyRequest {
    pub key: String,
}

/// Response of POST /trigger-hls-conversion
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConversionJob {
    pub job_id: String,
}

/// Body of POST /job-status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusRequest {
    pub job_id: String,
}

/// Response of POST /generate-download-url
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DownloadUrl {
    pub signed_url: String,
}

fn require_non_empty(field: &str, value: &str) -> WorkflowResult<()> {
    if value.is_empty() {
        return Err(WorkflowError::invalid_response(format!(
            "field '{}' is empty",
            field
        )));
    }
    Ok(())
}

impl SignedUpload {
    pub fn validate(self) -> WorkflowResult<Self> {
        require_non_empty("signedUrl", &self.signed_url)?;
        require_non_empty("key", &self.key)?;
        Ok(self)
    }
}

impl ConversionJob {
    pub fn validate(self) -> WorkflowResult<Self> {
        require_non_empty("jobId", &self.job_id)?;
        Ok(self)
    }
}

impl DownloadUrl {
    pub fn validate(self) -> WorkflowResult<Self> {
        require_non_empty("signedUrl", &self.signed_url)?;
        Ok(self)
    }
}
