//! Data models for the upload workflow
//!
//! Everything here is transient UI state or a wire shape of the remote API;
//! nothing is persisted.

mod file;
mod job;
pub mod remote;
mod session;

pub use file::*;
pub use job::*;
pub use remote::{
    ConversionJob, DownloadUrl, JobStatusRequest, SignedUpload, SignedUrlRequest, VideoKeyRequest,
};
pub use session::*;
