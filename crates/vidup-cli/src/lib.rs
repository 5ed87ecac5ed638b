//! Terminal front-end for the video upload workflow.
//!
//! A file picker, the upload/convert/status/download workflow and a console
//! view, wired together by a line-oriented command loop.

pub mod picker;
pub mod repl;
pub mod view;
pub mod workflow;

pub use picker::{FileFilter, FilePicker};
pub use repl::{App, Command, Flow};
pub use view::{ConsoleView, WorkflowView};
pub use workflow::UploadWorkflow;

/// Initialize tracing for the CLI. Logs go to stderr so they do not mix
/// with the rendered page on stdout.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
