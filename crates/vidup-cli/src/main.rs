//! vidup: upload a video, convert it to HLS and play it back.
//!
//! Set VIDUP_API_URL (or pass --base-url) to point at the backend.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use vidup_api_client::ApiClient;
use vidup_cli::{init_tracing, App, ConsoleView, FileFilter, FilePicker, UploadWorkflow};
use vidup_core::config::parse_timeout_secs;
use vidup_core::ClientConfig;

#[derive(Parser)]
#[command(name = "vidup", about = "Upload a video and convert it to HLS")]
struct Cli {
    /// Remote API root (overrides VIDUP_API_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds, 0 for none (overrides VIDUP_HTTP_TIMEOUT_SECS)
    #[arg(long)]
    timeout_secs: Option<String>,

    /// Accept any file, not only video types
    #[arg(long)]
    any_file: bool,

    /// File to select before the prompt starts
    file: Option<PathBuf>,
}

fn load_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = ClientConfig::from_env().context("Invalid client configuration")?;
    if let Some(base_url) = &cli.base_url {
        config = ClientConfig::new(base_url.as_str())
            .context("Invalid --base-url")?
            .with_timeout(config.timeout);
    }
    if let Some(raw) = &cli.timeout_secs {
        config = config.with_timeout(parse_timeout_secs(raw).context("Invalid --timeout-secs")?);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    tracing::info!(base_url = %config.base_url, "Starting vidup");

    let client = ApiClient::new(config).context("Failed to create API client")?;

    let filter = if cli.any_file {
        FileFilter::Any
    } else {
        FileFilter::VideoOnly
    };
    let mut view = ConsoleView::new(std::io::stdout());
    view.render_page(
        vidup_cli::picker::PLACEHOLDER_LABEL,
        &vidup_core::UploadSession::default(),
    );

    let workflow = UploadWorkflow::new(client, view);
    let mut app = App::new(FilePicker::new(filter), workflow);

    if let Some(file) = cli.file {
        app.pick(file);
    }
    app.handle(vidup_cli::Command::Help).await;

    app.run(BufReader::new(tokio::io::stdin()))
        .await
        .context("Failed to read commands from stdin")?;

    Ok(())
}
