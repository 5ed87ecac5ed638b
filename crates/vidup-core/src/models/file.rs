use std::path::{Path, PathBuf};

/// MIME prefix accepted by the file picker's default filter
pub const VIDEO_MIME_PREFIX: &str = "video/";

/// A file the user chose for upload.
///
/// Content is not held in memory; it is streamed from `path` when the
/// upload starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub path: PathBuf,
    pub size: u64,
}

impl SelectedFile {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        path: impl Into<PathBuf>,
        size: u64,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            path: path.into(),
            size,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_video(&self) -> bool {
        self.content_type.starts_with(VIDEO_MIME_PREFIX)
    }
}
