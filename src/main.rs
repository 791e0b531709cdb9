//! Progress Tracker MCP Server - Main Entry Point
//!
//! This is the main entry point for the progress MCP server application.
//! The actual implementation is in the `progress_mcp` library.

use anyhow::Result;
use clap::Parser;
use mcp_attr::server::serve_stdio;
use progress_mcp::config::TrackerConfig;
use progress_mcp::notify::{self, LogSink};
use progress_mcp::TrackerServerHandler;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Progress Tracker MCP Server - weighted assignment and task progress via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the working JSON document (default from config, then progress_data.json)
    file: Option<PathBuf>,

    /// Path to the config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Do not write the working file after each change
    #[arg(long)]
    no_autosave: bool,

    /// Seconds between deadline scans
    #[arg(long, value_name = "SECS")]
    notify_interval: Option<u64>,

    /// Do not ring the terminal bell on alerts
    #[arg(long)]
    quiet_alerts: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the MCP transport; logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => TrackerConfig::load_from(path)?,
        None => TrackerConfig::load()?,
    };

    let file = args.file.unwrap_or(config.data_file);
    let autosave = config.autosave && !args.no_autosave;
    let interval = args
        .notify_interval
        .unwrap_or(config.notify_interval_secs)
        .max(1);
    let sink = LogSink {
        audible: config.audible_alerts && !args.quiet_alerts,
    };

    info!(
        "Starting progress-mcp with {} (autosave: {}, scan every {}s)",
        file.display(),
        autosave,
        interval
    );

    let handler = TrackerServerHandler::new(&file, autosave);
    let scheduler = notify::spawn_scheduler(handler.session(), Duration::from_secs(interval), sink);

    let served = serve_stdio(handler).await;
    scheduler.abort();
    served?;
    Ok(())
}
