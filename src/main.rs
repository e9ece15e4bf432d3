//! Command line front end for chunkdl.

use std::path::PathBuf;

use chunkdl::progress::{ProgressBarOpts, ProgressDisplay};
use chunkdl::{Download, DownloaderBuilder};
use clap::Parser;
use color_eyre::eyre::{bail, Result, WrapErr};
use indicatif::{HumanBytes, HumanDuration};
use reqwest::Url;
use tracing::debug;

/// Download a file over HTTP(S) in concurrent chunks.
#[derive(Parser, Debug)]
#[command(name = "chunkdl", version, about)]
struct Args {
    /// URL to download from
    url: String,

    /// Directory in which the downloaded file is stored
    #[arg(short, long, default_value = ".")]
    path: PathBuf,

    /// Name to save the file with, defaults to the last segment of the URL
    #[arg(short, long)]
    name: Option<String>,

    /// Number of chunks the file is downloaded in (values below 1 mean 1)
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    chunks: i64,

    /// Replace the destination file if it already exists
    #[arg(long)]
    overwrite: bool,

    /// Do not draw the progress bar
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    debug!(?args, "CLI arguments parsed");

    if !args.path.exists() {
        bail!("Path '{}' does not exist", args.path.display());
    }

    let url = Url::parse(&args.url).wrap_err_with(|| format!("invalid URL '{}'", args.url))?;
    let download = match args.name.as_deref() {
        Some(name) if !name.is_empty() => Download::new(&url, name),
        _ => Download::try_from(&url)?,
    };
    let chunks = usize::try_from(args.chunks).unwrap_or(0).max(1);

    let downloader = DownloaderBuilder::hidden()
        .directory(args.path)
        .chunks(chunks)
        .overwrite(args.overwrite)
        .build();

    let handle = downloader.spawn(download);
    let style = if args.quiet {
        ProgressBarOpts::hidden()
    } else {
        ProgressBarOpts::with_pip_style()
    };
    let follow = tokio::spawn(ProgressDisplay::new(style).follow(handle.progress()));

    let token = handle.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });

    let result = handle.wait().await;
    follow.await?;
    let summary = result.wrap_err("Failed to download")?;

    println!(
        "Download complete in {}: {} in {} chunk(s). File saved to {}",
        HumanDuration(summary.elapsed()),
        HumanBytes(summary.size()),
        summary.chunks(),
        summary.path().display()
    );
    Ok(())
}
