//! Upload workflow
//!
//! Drives signed URL -> upload -> trigger conversion as one user action, and
//! exposes status checks and download URL generation as separate, manually
//! triggered actions. A single instance owns the session; every action takes
//! `&mut self`, so at most one remote sequence is in flight per instance.
//!
//! Nothing is retried. A failed step leaves the session in `Failed` (or, for
//! the manual actions, notifies the user) and the user starts over.

use tokio::sync::mpsc;
use vidup_core::models::SignedUpload;
use vidup_core::{
    LogLevel, ProgressCallback, ProgressTracker, SelectedFile, UploadSession, VideoPipeline,
    WorkflowError, WorkflowResult, WorkflowState,
};

use crate::view::WorkflowView;

pub const SELECT_FILE_ALERT: &str = "Please select a file.";
pub const NO_JOB_ID_ALERT: &str = "No job ID available.";
pub const NO_VIDEO_ALERT: &str = "No video uploaded yet.";
pub const CONVERSION_PENDING_ALERT: &str = "Conversion is not complete yet.";
pub const STATUS_FAILED_ALERT: &str = "Failed to check job status.";
pub const DOWNLOAD_FAILED_ALERT: &str = "Failed to generate download URL.";
pub const TRIGGER_FAILED_STATUS: &str = "Failed to trigger HLS conversion.";

pub struct UploadWorkflow<P, V> {
    pipeline: P,
    view: V,
    session: UploadSession,
    selected: Option<SelectedFile>,
}

impl<P, V> UploadWorkflow<P, V>
where
    P: VideoPipeline,
    V: WorkflowView,
{
    pub fn new(pipeline: P, view: V) -> Self {
        Self {
            pipeline,
            view,
            session: UploadSession::new(),
            selected: None,
        }
    }

    pub fn session(&self) -> &UploadSession {
        &self.session
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Picker callback: replaces the current selection.
    pub fn select_file(&mut self, file: SelectedFile) {
        self.selected = Some(file);
    }

    /// Upload the selected file and start its conversion.
    pub async fn start_upload(&mut self) -> WorkflowResult<()> {
        let Some(file) = self.selected.clone() else {
            return Err(self.reject(WorkflowError::NoFileSelected, SELECT_FILE_ALERT));
        };

        let signed = match self.request_signed_url(&file).await {
            Ok(signed) => signed,
            Err(e) => return Err(self.fail_upload(e)),
        };

        if let Err(e) = self.upload_binary(&signed, &file).await {
            return Err(self.fail_upload(e));
        }

        self.trigger_conversion(&signed.key).await
    }

    async fn request_signed_url(&mut self, file: &SelectedFile) -> WorkflowResult<SignedUpload> {
        self.transition(WorkflowState::SigningUrl, "Generating signed URL...");
        self.pipeline.generate_signed_url(file).await
    }

    async fn upload_binary(
        &mut self,
        signed: &SignedUpload,
        file: &SelectedFile,
    ) -> WorkflowResult<()> {
        self.transition(WorkflowState::Uploading, "Uploading...");

        // The callback only queues; progress is applied here, on the
        // workflow's own task, between polls of the transfer.
        let (tx, mut rx) = mpsc::unbounded_channel();
        let on_progress: ProgressCallback = Box::new(move |progress| {
            let _ = tx.send(progress);
        });
        let mut tracker = ProgressTracker::new();

        let upload = self
            .pipeline
            .upload_to_signed_url(&signed.signed_url, file, on_progress);
        tokio::pin!(upload);

        let result = loop {
            tokio::select! {
                biased;
                Some(progress) = rx.recv() => {
                    if let Some(pct) = tracker.observe(progress) {
                        self.session.progress = pct;
                        self.view.render(&self.session);
                    }
                }
                result = &mut upload => break result,
            }
        };
        while let Ok(progress) = rx.try_recv() {
            if let Some(pct) = tracker.observe(progress) {
                self.session.progress = pct;
                self.view.render(&self.session);
            }
        }
        result?;

        tracing::info!(key = %signed.key, filename = %file.name, "Upload successful");
        self.session.video_key = Some(signed.key.clone());
        self.selected = None;
        self.session.progress = 0;
        self.session.status_message = format!("Upload successful! Video key: {}", signed.key);
        self.view.render(&self.session);
        Ok(())
    }

    async fn trigger_conversion(&mut self, key: &str) -> WorkflowResult<()> {
        self.transition(
            WorkflowState::TriggeringConversion,
            "Triggering HLS conversion...",
        );

        match self.pipeline.trigger_hls_conversion(key).await {
            Ok(job) => {
                self.session.status_message =
                    format!("HLS conversion triggered: Job ID {}", job.job_id);
                self.session.job_id = Some(job.job_id);
                self.session.state = WorkflowState::AwaitingStatusCheck;
                self.view.render(&self.session);
                Ok(())
            }
            Err(e) => {
                log_error("HLS conversion error", &e);
                self.transition(WorkflowState::Failed, TRIGGER_FAILED_STATUS);
                Err(e)
            }
        }
    }

    /// Fetch the job's status once. Repeatable; there is no polling.
    pub async fn check_status(&mut self) -> WorkflowResult<()> {
        let Some(job_id) = self.session.job_id.clone() else {
            return Err(self.reject(WorkflowError::NoJobId, NO_JOB_ID_ALERT));
        };

        match self.pipeline.job_status(&job_id).await {
            Ok(job) => {
                self.session.conversion_complete = job.is_complete();
                self.session.state = if job.is_complete() {
                    WorkflowState::Complete
                } else {
                    WorkflowState::AwaitingStatusCheck
                };
                self.session.job_status = Some(job);
                self.view.render(&self.session);
                Ok(())
            }
            Err(e) => {
                log_error("Status check error", &e);
                self.view.alert(STATUS_FAILED_ALERT);
                Err(e)
            }
        }
    }

    /// Request a playback URL for the converted video.
    pub async fn request_download_url(&mut self) -> WorkflowResult<()> {
        let Some(key) = self.session.video_key.clone().filter(|k| !k.is_empty()) else {
            return Err(self.reject(WorkflowError::NoVideoKey, NO_VIDEO_ALERT));
        };
        if !self.session.conversion_complete {
            return Err(self.reject(
                WorkflowError::ConversionIncomplete,
                CONVERSION_PENDING_ALERT,
            ));
        }

        match self.pipeline.generate_download_url(&key).await {
            Ok(url) => {
                self.session.video_url = Some(url.signed_url);
                self.view.render(&self.session);
                Ok(())
            }
            Err(e) => {
                log_error("Download error", &e);
                self.view.alert(DOWNLOAD_FAILED_ALERT);
                Err(e)
            }
        }
    }

    fn transition(&mut self, state: WorkflowState, status: &str) {
        tracing::debug!(from = %self.session.state, to = %state, "Workflow transition");
        self.session.state = state;
        self.session.status_message = status.to_string();
        self.view.render(&self.session);
    }

    fn reject(&mut self, err: WorkflowError, alert: &str) -> WorkflowError {
        tracing::debug!(error = %err, "Action rejected");
        self.view.alert(alert);
        err
    }

    fn fail_upload(&mut self, err: WorkflowError) -> WorkflowError {
        log_error("Upload error", &err);
        self.session.progress = 0;
        self.transition(WorkflowState::Failed, &format!("Upload failed: {}", err));
        err
    }
}

fn log_error(context: &str, err: &WorkflowError) {
    match err.log_level() {
        LogLevel::Debug => tracing::debug!(error = %err, "{}", context),
        LogLevel::Warn => tracing::warn!(error = %err, "{}", context),
        LogLevel::Error => tracing::error!(error = %err, "{}", context),
    }
}
