use std::fmt::{Display, Formatter, Result as FmtResult};

use super::job::JobStatus;

/// Where the upload workflow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    SigningUrl,
    Uploading,
    TriggeringConversion,
    AwaitingStatusCheck,
    Complete,
    Failed,
}

impl Display for WorkflowState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            WorkflowState::Idle => write!(f, "idle"),
            WorkflowState::SigningUrl => write!(f, "signing_url"),
            WorkflowState::Uploading => write!(f, "uploading"),
            WorkflowState::TriggeringConversion => write!(f, "triggering_conversion"),
            WorkflowState::AwaitingStatusCheck => write!(f, "awaiting_status_check"),
            WorkflowState::Complete => write!(f, "complete"),
            WorkflowState::Failed => write!(f, "failed"),
        }
    }
}

/// Transient state of one upload, owned by a single workflow instance.
///
/// Fields start empty and are only filled by successful remote calls:
/// `video_key` after the upload, `job_id` after triggering conversion,
/// `video_url` after the download URL request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadSession {
    pub state: WorkflowState,
    /// 0-100, shown only while above zero
    pub progress: u8,
    pub status_message: String,
    pub video_key: Option<String>,
    pub job_id: Option<String>,
    pub job_status: Option<JobStatus>,
    pub conversion_complete: bool,
    pub video_url: Option<String>,
}

impl UploadSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_check_status(&self) -> bool {
        self.job_id.is_some()
    }

    pub fn can_download(&self) -> bool {
        self.conversion_complete && self.video_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    pub fn show_progress(&self) -> bool {
        self.progress > 0
    }

    /// Pretty-printed job status payload, if one was fetched
    pub fn job_status_display(&self) -> Option<String> {
        self.job_status.as_ref().map(JobStatus::pretty)
    }
}
