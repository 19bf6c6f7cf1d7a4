//! Playlist submission
//!
//! Resolves the command-line paths, queues every recognized video file on
//! the playback server and, when only files were given, starts playback of
//! the session the server handed back.
//!
//! The session identifier is carried in the [`RunReport`] threaded through
//! `run` and `traverse`; the first identifier received wins.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::{PlaylistClient, PlaylistError};
use crate::cli::{Cli, ExitCode, Output};
use crate::config::{Config, Settings};
use crate::models::{RunReport, SessionId, VideoExtensions};
use crate::scan::{ScanError, Walk};

/// Errors that abort a run
#[derive(Error, Debug)]
pub enum RunError {
    #[error("Cannot resolve {}: {source}", path.display())]
    InvalidPath { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Playlist(#[from] PlaylistError),
}

impl RunError {
    /// Exit code reported for this failure
    pub fn exit_code(&self) -> ExitCode {
        match self {
            RunError::InvalidPath { .. } => ExitCode::InvalidArgs,
            RunError::Scan(_) => ExitCode::Error,
            RunError::Playlist(_) => ExitCode::NetworkError,
        }
    }
}

/// Outcome of submitting a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Extension not recognized; nothing was sent
    Skipped,
    /// Posted to the playlist; carries the session id if the server sent one
    Queued { session: Option<SessionId> },
}

/// Queues files on the playback server
pub struct Submitter {
    client: PlaylistClient,
    extensions: VideoExtensions,
}

impl Submitter {
    /// Build a submitter from resolved settings
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: PlaylistClient::with_timeout(settings.base_url(), settings.request_timeout),
            extensions: settings.extensions.clone(),
        }
    }

    /// Build a submitter around an existing client (for testing)
    pub fn with_client(client: PlaylistClient, extensions: VideoExtensions) -> Self {
        Self { client, extensions }
    }

    /// Queue one file if its extension is recognized
    pub async fn submit(&self, file: &Path) -> Result<Submission, RunError> {
        if !self.extensions.matches(file) {
            debug!(file = %file.display(), "not a recognized video, skipping");
            return Ok(Submission::Skipped);
        }

        let session = self.client.add(file).await?;
        info!(file = %file.display(), "queued");
        Ok(Submission::Queued { session })
    }

    /// Submit every file below `dir`, recording each outcome in `report`
    pub async fn traverse(&self, dir: &Path, report: &mut RunReport) -> Result<(), RunError> {
        let mut walk = Walk::new(dir);
        for file in walk.by_ref() {
            let file = file?;
            let submission = self.submit(&file).await?;
            report.record(file, submission);
        }
        debug!(dir = %dir.display(), directories = walk.visited(), "walk finished");
        Ok(())
    }

    /// Process every argument, then start playback if allowed
    ///
    /// Playback is requested only when a session id was obtained, at least
    /// one argument was a file, and neither `queue_only` nor a directory
    /// argument suppressed it.
    pub async fn run(&self, paths: &[PathBuf], queue_only: bool) -> Result<RunReport, RunError> {
        let mut report = RunReport {
            queue_only,
            ..Default::default()
        };
        let mut play_file = false;

        for arg in paths {
            let Some((path, meta)) = resolve(arg)? else {
                warn!(path = %arg.display(), "no such file or directory, ignoring");
                report.ignored.push(arg.clone());
                continue;
            };

            if meta.is_file() {
                let submission = self.submit(&path).await?;
                report.record(path, submission);
                play_file = true;
            } else if meta.is_dir() {
                // Folders are only ever queued
                report.queue_only = true;
                self.traverse(&path, &mut report).await?;
            } else {
                warn!(path = %path.display(), "not a file or directory, ignoring");
                report.ignored.push(path);
            }
        }

        if play_file && !report.queue_only {
            if let Some(ref session) = report.session_id {
                let status = self.client.play(session).await?;
                info!(%session, %status, "playback requested");
                report.played = true;
            }
        }

        Ok(report)
    }
}

/// Canonicalize an argument and stat it
///
/// A path that does not exist resolves to `None`; other I/O failures
/// (permissions, malformed paths) are errors.
fn resolve(arg: &Path) -> Result<Option<(PathBuf, fs::Metadata)>, RunError> {
    let resolved = fs::canonicalize(arg).and_then(|path| {
        let meta = fs::metadata(&path)?;
        Ok((path, meta))
    });

    match resolved {
        Ok(found) => Ok(Some(found)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(RunError::InvalidPath {
            path: arg.to_path_buf(),
            source,
        }),
    }
}

impl RunReport {
    /// Record a submission, keeping the first session id received
    pub fn record(&mut self, file: PathBuf, submission: Submission) {
        match submission {
            Submission::Skipped => self.skipped.push(file),
            Submission::Queued { session } => {
                if self.session_id.is_none() {
                    self.session_id = session;
                }
                self.submitted.push(file);
            }
        }
    }
}

// =============================================================================
// Run Command
// =============================================================================

pub async fn run_cmd(cli: &Cli, output: &Output) -> ExitCode {
    let config = match cli.config {
        Some(ref path) => Config::load_from(path),
        None => Config::load(),
    };
    let settings = config.resolve(cli.overrides());
    debug!(server = %settings.base_url(), queue_only = settings.queue_only, "resolved settings");

    let submitter = Submitter::new(&settings);
    match submitter.run(&cli.paths, settings.queue_only).await {
        Ok(report) => {
            if output.json {
                if let Err(e) = output.print(&report) {
                    return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
                }
            } else {
                output.info(&report);
            }
            ExitCode::Success
        }
        Err(e) => output.error(e.to_string(), e.exit_code()),
    }
}
