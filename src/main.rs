//! c8tfile - queue local video files on a Chromecast playback server
//!
//! # Usage
//!
//! ```bash
//! # Queue and play
//! c8tfile movie.mp4
//!
//! # Queue a folder (never auto-plays)
//! c8tfile ~/Videos/series
//! ```

use clap::Parser;
use tracing_subscriber::EnvFilter;

use c8tfile::cli::{Cli, Output};
use c8tfile::commands;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let output = Output::new(&cli);

    // Logs go to stderr so a JSON report on stdout stays parseable
    let level = if output.quiet || output.json {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    commands::run_cmd(&cli, &output).await.into()
}
