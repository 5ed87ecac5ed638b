//! Rendering of the upload session to the terminal.

use std::io::Write;

use vidup_core::UploadSession;

/// Sink for everything the workflow shows the user.
pub trait WorkflowView {
    /// Blocking notification (the browser's alert box).
    fn alert(&mut self, message: &str);

    /// Informational line that does not belong to the session.
    fn notice(&mut self, message: &str);

    /// Called after every session change.
    fn render(&mut self, session: &UploadSession);
}

/// Writes session changes as they happen, one line per changed element.
pub struct ConsoleView<W: Write> {
    out: W,
    last: UploadSession,
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last: UploadSession::default(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Full page: heading, picker button, session fields and available actions.
    pub fn render_page(&mut self, picker_label: &str, session: &UploadSession) {
        let mut lines = vec![
            "Video Uploader".to_string(),
            format!("[{}]", picker_label),
            "[Upload]".to_string(),
        ];
        if session.show_progress() {
            lines.push(progress_line(session.progress));
        }
        if !session.status_message.is_empty() {
            lines.push(session.status_message.clone());
        }
        if session.can_check_status() {
            lines.push("[Check Job Status]".to_string());
        }
        if let Some(job_status) = session.job_status_display() {
            lines.push(job_status);
        }
        if session.can_download() {
            lines.push("[Download/Play Video]".to_string());
        }
        if let Some(url) = &session.video_url {
            lines.push(video_line(url));
        }
        self.write_lines(&lines);
    }

    fn write_lines(&mut self, lines: &[String]) {
        for line in lines {
            // Broken stdout leaves nothing useful to report to.
            let _ = writeln!(self.out, "{}", line);
        }
        let _ = self.out.flush();
    }
}

fn progress_line(progress: u8) -> String {
    format!("Upload Progress: {}%", progress)
}

fn video_line(url: &str) -> String {
    format!("Playable video: {}", url)
}

impl<W: Write> WorkflowView for ConsoleView<W> {
    fn alert(&mut self, message: &str) {
        self.write_lines(&[format!("! {}", message)]);
    }

    fn notice(&mut self, message: &str) {
        self.write_lines(&[message.to_string()]);
    }

    fn render(&mut self, session: &UploadSession) {
        let mut lines = Vec::new();

        if session.progress != self.last.progress && session.show_progress() {
            lines.push(progress_line(session.progress));
        }
        if session.status_message != self.last.status_message
            && !session.status_message.is_empty()
        {
            lines.push(session.status_message.clone());
        }
        if session.can_check_status() && !self.last.can_check_status() {
            lines.push("Check Job Status available (type `status`)".to_string());
        }
        if session.job_status != self.last.job_status {
            if let Some(job_status) = session.job_status_display() {
                lines.push(job_status);
            }
        }
        if session.can_download() && !self.last.can_download() {
            lines.push("Download/Play Video available (type `download`)".to_string());
        }
        if session.video_url != self.last.video_url {
            if let Some(url) = &session.video_url {
                lines.push(video_line(url));
            }
        }

        self.last = session.clone();
        self.write_lines(&lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vidup_core::JobStatus;

    fn output(view: ConsoleView<Vec<u8>>) -> String {
        String::from_utf8(view.into_inner()).unwrap()
    }

    #[test]
    fn render_prints_only_changes() {
        let mut view = ConsoleView::new(Vec::new());
        let mut session = UploadSession::new();

        session.status_message = "Uploading...".to_string();
        view.render(&session);
        session.progress = 40;
        view.render(&session);
        view.render(&session);
        session.progress = 0;
        session.status_message = "Upload successful! Video key: abc123".to_string();
        view.render(&session);

        assert_eq!(
            output(view),
            "Uploading...\nUpload Progress: 40%\nUpload successful! Video key: abc123\n"
        );
    }

    #[test]
    fn render_announces_unlocked_actions() {
        let mut view = ConsoleView::new(Vec::new());
        let mut session = UploadSession::new();
        session.video_key = Some("abc123".to_string());
        session.job_id = Some("job-1".to_string());
        view.render(&session);

        session.job_status = Some(JobStatus::from_payload(json!({ "status": "COMPLETE" })).unwrap());
        session.conversion_complete = true;
        view.render(&session);

        let out = output(view);
        assert!(out.contains("Check Job Status available"));
        assert!(out.contains("{\n  \"status\": \"COMPLETE\"\n}"));
        assert!(out.contains("Download/Play Video available"));
    }

    #[test]
    fn page_hides_gated_buttons() {
        let mut view = ConsoleView::new(Vec::new());
        let mut session = UploadSession::new();
        session.job_id = Some("job-1".to_string());
        session.video_key = Some("abc123".to_string());
        session.job_status =
            Some(JobStatus::from_payload(json!({ "status": "PROCESSING" })).unwrap());
        view.render_page("Choose File", &session);

        let out = output(view);
        assert!(out.starts_with("Video Uploader\n[Choose File]\n[Upload]\n"));
        assert!(out.contains("[Check Job Status]"));
        assert!(!out.contains("[Download/Play Video]"));
        assert!(!out.contains("Upload Progress"));
    }

    #[test]
    fn alerts_are_marked() {
        let mut view = ConsoleView::new(Vec::new());
        view.alert("Please select a file.");
        assert_eq!(output(view), "! Please select a file.\n");
    }
}
