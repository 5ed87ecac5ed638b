//! vidup core library
//!
//! Domain models, the error taxonomy, client configuration and the
//! `VideoPipeline` seam shared by the API client and the terminal front-end.

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod progress;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{LogLevel, WorkflowError, WorkflowResult};
pub use models::{
    JobStatus, SelectedFile, UploadSession, WorkflowState, COMPLETE_STATUS, VIDEO_MIME_PREFIX,
};
pub use pipeline::{ProgressCallback, VideoPipeline};
pub use progress::{percent_complete, ProgressTracker, TransferProgress};
