use std::io::Write;

use mockito::Matcher;
use serde_json::json;
use tempfile::TempDir;
use tokio::io::BufReader;
use vidup_api_client::ApiClient;
use vidup_cli::{App, FileFilter, FilePicker, UploadWorkflow, WorkflowView};
use vidup_core::{ClientConfig, UploadSession, WorkflowState};

#[derive(Default)]
struct TranscriptView {
    lines: Vec<String>,
    alerts: Vec<String>,
}

impl WorkflowView for TranscriptView {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn notice(&mut self, message: &str) {
        self.lines.push(message.to_string());
    }

    fn render(&mut self, session: &UploadSession) {
        if self.lines.last() != Some(&session.status_message) {
            self.lines.push(session.status_message.clone());
        }
    }
}

fn write_video(dir: &TempDir, name: &str, len: usize) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(&vec![7u8; len]).unwrap();
    path
}

fn app_for(server: &mockito::Server) -> App<ApiClient, TranscriptView> {
    let client = ApiClient::new(ClientConfig::new(server.url()).unwrap()).unwrap();
    App::new(
        FilePicker::new(FileFilter::VideoOnly),
        UploadWorkflow::new(client, TranscriptView::default()),
    )
}

#[tokio::test]
async fn full_round_trip_through_command_loop() {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let path = write_video(&dir, "clip.mp4", 200 * 1024);

    let sign = server
        .mock("POST", "/generate-signed-url")
        .match_body(Matcher::Json(
            json!({ "filename": "clip.mp4", "contentType": "video/mp4" }),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({ "signedUrl": format!("{}/bucket/abc123", server.url()), "key": "abc123" })
                .to_string(),
        )
        .create_async()
        .await;
    let put = server
        .mock("PUT", "/bucket/abc123")
        .match_header("content-type", "video/mp4")
        .with_status(200)
        .create_async()
        .await;
    let trigger = server
        .mock("POST", "/trigger-hls-conversion")
        .match_body(Matcher::Json(json!({ "key": "abc123" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"jobId":"job-9"}"#)
        .create_async()
        .await;
    let status = server
        .mock("POST", "/job-status")
        .match_body(Matcher::Json(json!({ "jobId": "job-9" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"COMPLETE","jobPercentComplete":100}"#)
        .create_async()
        .await;
    let download = server
        .mock("POST", "/generate-download-url")
        .match_body(Matcher::Json(json!({ "key": "abc123" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"signedUrl":"https://cdn.test/abc123/index.m3u8"}"#)
        .create_async()
        .await;

    let mut app = app_for(&server);
    let script = format!(
        "pick {}\nupload\nstatus\ndownload\nquit\nupload\n",
        path.display()
    );
    app.run(BufReader::new(script.as_bytes())).await.unwrap();

    sign.assert_async().await;
    put.assert_async().await;
    trigger.assert_async().await;
    status.assert_async().await;
    download.assert_async().await;

    let workflow = app.workflow();
    let session = workflow.session();
    assert_eq!(session.video_key.as_deref(), Some("abc123"));
    assert_eq!(session.job_id.as_deref(), Some("job-9"));
    assert!(session.conversion_complete);
    assert_eq!(session.state, WorkflowState::Complete);
    assert_eq!(
        session.video_url.as_deref(),
        Some("https://cdn.test/abc123/index.m3u8")
    );
    assert!(workflow.selected_file().is_none());
    assert_eq!(app.picker().label(), "clip.mp4");

    let lines = &workflow.view().lines;
    assert!(lines.contains(&"Upload successful! Video key: abc123".to_string()));
    assert!(lines.contains(&"HLS conversion triggered: Job ID job-9".to_string()));
    assert!(workflow.view().alerts.is_empty());
}

#[tokio::test]
async fn upload_without_file_makes_no_request() {
    let mut server = mockito::Server::new_async().await;
    let any = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let mut app = app_for(&server);
    app.run(BufReader::new(&b"upload\n"[..])).await.unwrap();

    any.assert_async().await;
    assert_eq!(
        app.workflow().view().alerts,
        vec!["Please select a file.".to_string()]
    );
    assert_eq!(app.workflow().session(), &UploadSession::default());
}

#[tokio::test]
async fn rejected_signed_put_reports_failure() {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let path = write_video(&dir, "clip.mkv", 4096);

    server
        .mock("POST", "/generate-signed-url")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({ "signedUrl": format!("{}/bucket/k1", server.url()), "key": "k1" })
                .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("PUT", "/bucket/k1")
        .with_status(403)
        .with_body("expired")
        .create_async()
        .await;
    let trigger = server
        .mock("POST", "/trigger-hls-conversion")
        .expect(0)
        .create_async()
        .await;

    let mut app = app_for(&server);
    app.pick(path);
    app.run(BufReader::new(&b"upload\nstatus\n"[..])).await.unwrap();

    trigger.assert_async().await;
    let session = app.workflow().session();
    assert_eq!(session.state, WorkflowState::Failed);
    assert_eq!(
        session.status_message,
        "Upload failed: Request failed with status code 403: expired"
    );
    assert_eq!(session.progress, 0);
    assert!(session.video_key.is_none());
    assert!(app.workflow().selected_file().is_some());
    assert_eq!(
        app.workflow().view().alerts,
        vec!["No job ID available.".to_string()]
    );
}

#[tokio::test]
async fn non_video_pick_is_rejected() {
    let server = mockito::Server::new_async().await;
    let dir = TempDir::new().unwrap();
    let path = write_video(&dir, "notes.txt", 10);

    let mut app = app_for(&server);
    app.pick(path);

    assert_eq!(app.picker().label(), "Choose File");
    assert!(app.workflow().selected_file().is_none());
    assert_eq!(app.workflow().view().alerts.len(), 1);
}
