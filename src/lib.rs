//! c8tfile - queue local video files on a Chromecast playback server
//!
//! Walks files and directories, submits every recognized video to the
//! server's playlist and optionally starts playback.
//!
//! # Modules
//!
//! - `models` - Session id, video extensions, run report
//! - `api` - Playback server client
//! - `scan` - Directory walking
//! - `config` - Config file and resolved settings
//! - `cli` - Argument parsing and output helpers
//! - `commands` - Submission and playback flow

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod scan;

// Re-export commonly used types
pub use models::{RunReport, SessionId, VideoExtensions};

pub use api::PlaylistClient;
pub use commands::{RunError, Submission, Submitter};
pub use config::{Config, Settings};
