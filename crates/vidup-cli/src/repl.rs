//! Interactive command loop: one line per button press.

use std::path::PathBuf;
use std::str::FromStr;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use vidup_core::VideoPipeline;

use crate::picker::FilePicker;
use crate::view::WorkflowView;
use crate::workflow::UploadWorkflow;

pub const HELP: &str =
    "Commands: pick <path>, upload, status, download, show, help, quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Pick(PathBuf),
    Upload,
    Status,
    Download,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "pick" | "choose" => {
                if rest.is_empty() {
                    Err("pick needs a file path".to_string())
                } else {
                    Ok(Command::Pick(PathBuf::from(rest)))
                }
            }
            "upload" => Ok(Command::Upload),
            "status" | "check" => Ok(Command::Status),
            "download" | "play" => Ok(Command::Download),
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(format!("Unknown command '{}'", other)),
        }
    }
}

/// Whether the loop should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Ties the picker to the workflow the way the page wires the two widgets.
pub struct App<P, V> {
    picker: FilePicker,
    workflow: UploadWorkflow<P, V>,
}

impl<P, V> App<P, V>
where
    P: VideoPipeline,
    V: WorkflowView,
{
    pub fn new(picker: FilePicker, workflow: UploadWorkflow<P, V>) -> Self {
        Self { picker, workflow }
    }

    pub fn picker(&self) -> &FilePicker {
        &self.picker
    }

    pub fn workflow(&self) -> &UploadWorkflow<P, V> {
        &self.workflow
    }

    /// Pick a file and hand it to the workflow.
    pub fn pick(&mut self, path: PathBuf) {
        match self.picker.pick(&path) {
            Ok(file) => {
                let label = format!("Selected {} ({})", file.name, file.content_type);
                self.workflow.select_file(file);
                self.workflow.view_mut().notice(&label);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "File pick rejected");
                self.workflow.view_mut().alert(&e.to_string());
            }
        }
    }

    /// Run one command. Workflow failures are already shown to the user by
    /// the workflow itself, so they do not stop the loop.
    pub async fn handle(&mut self, command: Command) -> Flow {
        match command {
            Command::Pick(path) => self.pick(path),
            Command::Upload => {
                let _ = self.workflow.start_upload().await;
            }
            Command::Status => {
                let _ = self.workflow.check_status().await;
            }
            Command::Download => {
                let _ = self.workflow.request_download_url().await;
            }
            Command::Show => {
                let summary = page_summary(self.picker.label(), &self.workflow);
                self.workflow.view_mut().notice(&summary);
            }
            Command::Help => self.workflow.view_mut().notice(HELP),
            Command::Quit => return Flow::Exit,
        }
        Flow::Continue
    }

    /// Read commands until EOF or `quit`.
    pub async fn run<R>(&mut self, input: R) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(command) => {
                    if self.handle(command).await == Flow::Exit {
                        break;
                    }
                }
                Err(message) => {
                    self.workflow.view_mut().notice(&format!("{}. {}", message, HELP));
                }
            }
        }
        Ok(())
    }
}

/// Plain-text snapshot of the page for the `show` command.
fn page_summary<P, V>(picker_label: &str, workflow: &UploadWorkflow<P, V>) -> String
where
    P: VideoPipeline,
    V: WorkflowView,
{
    let session = workflow.session();
    let mut lines = vec![format!("File: {}", picker_label)];
    lines.push(format!("State: {}", session.state));
    if session.show_progress() {
        lines.push(format!("Upload Progress: {}%", session.progress));
    }
    if !session.status_message.is_empty() {
        lines.push(format!("Status: {}", session.status_message));
    }
    if let Some(key) = &session.video_key {
        lines.push(format!("Video key: {}", key));
    }
    if let Some(job_id) = &session.job_id {
        lines.push(format!("Job ID: {}", job_id));
    }
    if let Some(job_status) = session.job_status_display() {
        lines.push(job_status);
    }
    if let Some(url) = &session.video_url {
        lines.push(format!("Playable video: {}", url));
    }

    let mut actions = vec!["pick", "upload"];
    if session.can_check_status() {
        actions.push("status");
    }
    if session.can_download() {
        actions.push("download");
    }
    lines.push(format!("Actions: {}", actions.join(", ")));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!("upload".parse::<Command>(), Ok(Command::Upload));
        assert_eq!("  STATUS ".parse::<Command>(), Ok(Command::Status));
        assert_eq!("play".parse::<Command>(), Ok(Command::Download));
        assert_eq!("exit".parse::<Command>(), Ok(Command::Quit));
        assert_eq!(
            "pick /videos/my holiday.mp4".parse::<Command>(),
            Ok(Command::Pick(PathBuf::from("/videos/my holiday.mp4")))
        );
    }

    #[test]
    fn rejects_bad_commands() {
        assert!("pick".parse::<Command>().is_err());
        assert_eq!(
            "transcode".parse::<Command>(),
            Err("Unknown command 'transcode'".to_string())
        );
    }
}
