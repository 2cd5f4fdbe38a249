mod args;
mod board;
mod browser;
mod error;
mod export;
mod extract;
mod page;
mod settings;
mod shape;
#[cfg(test)]
mod stub;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use browser::ChromeBrowser;
use error::ExportError;
use settings::{Overrides, Settings};

#[derive(Parser)]
#[command(
    name = "retro_export",
    about = "Export a retrospective board's columns and messages to CSV or plaintext"
)]
struct Cli {
    /// Board URL (http, https, ftp or file)
    url: Option<String>,
    /// Output format: csv or txt (any case)
    extension: Option<String>,
    /// Directory for the export (default: current directory)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
    /// Seconds to wait for the board to render
    #[arg(short, long)]
    timeout: Option<u64>,
    /// Chrome/Chromium executable to launch
    #[arg(long)]
    chrome: Option<PathBuf>,
    /// Show the browser window
    #[arg(long)]
    headed: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(path) => {
            println!("Successfully written to file at: {}", path.display());
            info!("Done in {:.1}s", t0.elapsed().as_secs_f64());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(failure_code(&e))
        }
    }
}

fn failure_code(e: &anyhow::Error) -> u8 {
    e.downcast_ref::<ExportError>().map_or(1, ExportError::exit_code)
}

async fn run(cli: Cli) -> Result<PathBuf> {
    // Validate before touching the browser.
    let request = args::validate(cli.url.as_deref(), cli.extension.as_deref())?;
    info!("Exporting {} as {}", request.url, request.format);

    let settings = Settings::load()?.apply(Overrides {
        selector_timeout_secs: cli.timeout,
        headed: cli.headed,
        chrome_path: cli.chrome,
        out_dir: cli.out_dir,
    });
    let out_dir = settings.resolve_out_dir()?;

    let browser = ChromeBrowser::launch(&settings).await?;
    let result = async {
        let page = browser.open(&request.url).await?;
        export::export_board(&page, request.format, &out_dir, settings.selector_timeout()).await
    }
    .await;
    browser.close().await;

    Ok(result?)
}
