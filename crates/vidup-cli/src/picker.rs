//! File selection for the upload form.
//!
//! The picker is the terminal stand-in for the browser file dialog: it turns
//! a path into a `SelectedFile` and remembers what to show as its label.

use std::path::Path;

use vidup_core::{SelectedFile, WorkflowError, WorkflowResult, VIDEO_MIME_PREFIX};

/// Label shown while nothing has been picked
pub const PLACEHOLDER_LABEL: &str = "Choose File";

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Which files the dialog lets through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileFilter {
    /// Only `video/*` types (the dialog's accept filter)
    #[default]
    VideoOnly,
    /// Filter bypassed; any regular file is accepted
    Any,
}

impl FileFilter {
    fn allows(&self, content_type: &str) -> bool {
        match self {
            FileFilter::VideoOnly => content_type.starts_with(VIDEO_MIME_PREFIX),
            FileFilter::Any => true,
        }
    }
}

#[derive(Debug, Default)]
pub struct FilePicker {
    filter: FileFilter,
    selected_name: Option<String>,
}

impl FilePicker {
    pub fn new(filter: FileFilter) -> Self {
        Self {
            filter,
            selected_name: None,
        }
    }

    /// Button text: the picked file's name, or the placeholder.
    pub fn label(&self) -> &str {
        self.selected_name.as_deref().unwrap_or(PLACEHOLDER_LABEL)
    }

    pub fn filter(&self) -> FileFilter {
        self.filter
    }

    /// Select `path`. On failure the previous selection and label are kept.
    pub fn pick(&mut self, path: impl AsRef<Path>) -> WorkflowResult<SelectedFile> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(WorkflowError::FileRejected(format!(
                "{} is not a regular file",
                path.display()
            )));
        }

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                WorkflowError::FileRejected(format!("{} has no usable file name", path.display()))
            })?
            .to_string();

        let content_type = mime_guess::from_path(path)
            .first()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());

        if !self.filter.allows(&content_type) {
            return Err(WorkflowError::FileRejected(format!(
                "{} is {}, not a video",
                name, content_type
            )));
        }

        tracing::debug!(filename = %name, content_type = %content_type, bytes = metadata.len(), "File picked");

        self.selected_name = Some(name.clone());
        Ok(SelectedFile::new(name, content_type, path, metadata.len()))
    }

    /// The dialog was dismissed without a choice.
    pub fn clear(&mut self) {
        self.selected_name = None;
    }
}
