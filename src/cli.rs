//! CLI - Command Line Interface for c8tfile
//!
//! Queues every video file named on the command line (or found below a
//! named directory) on the playback server, then starts playback when only
//! files were given.
//!
//! # Examples
//!
//! ```bash
//! # Queue and play a single movie
//! c8tfile ~/Videos/movie.mp4
//!
//! # Queue a whole folder (never auto-plays)
//! c8tfile ~/Videos/series
//!
//! # Queue files without starting playback, machine-readable report
//! c8tfile -Q --json a.mkv b.mkv
//! ```

use clap::Parser;
use serde::Serialize;
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::config::Overrides;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Network error
    NetworkError = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// c8tfile - queue local video files on a Chromecast playback server
#[derive(Parser, Debug)]
#[command(
    name = "c8tfile",
    version,
    author = "Gorka & Hermes",
    about = "Queue local video files on a Chromecast playback server",
    long_about = "Submits every .mkv, .mp4, .mpg, .mpeg and .avi file to the \
                  playback server's playlist.\n\n\
                  Directories are walked recursively. Playback starts \
                  automatically only when every argument is a file.",
    after_help = "EXAMPLES:\n\
                  c8tfile movie.mp4                   Queue and play\n\
                  c8tfile ~/Videos/series             Queue a folder\n\
                  c8tfile -Q a.mkv b.mkv              Queue without playing\n\
                  c8tfile --port 8181 --json x.avi    Custom port, JSON report"
)]
pub struct Cli {
    /// Files or directories to queue
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Queue only, never start playback
    #[arg(long, short = 'Q')]
    pub queue_only: bool,

    /// Playback server host (default 127.0.0.1)
    #[arg(long)]
    pub host: Option<String>,

    /// Playback server port (default 8080)
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j')]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }

    /// Settings supplied on the command line
    pub fn overrides(&self) -> Overrides {
        Overrides {
            host: self.host.clone(),
            port: self.port,
            queue_only: self.queue_only,
        }
    }
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data as a JSON envelope
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        let output = JsonOutput::success(data);
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
