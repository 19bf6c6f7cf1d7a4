//! Data structures and types for c8tfile
//!
//! Shared models used across the application:
//! - **Session**: the playlist session identifier handed out by the server
//! - **Media**: the set of video extensions that get queued
//! - **Report**: what a run submitted, skipped and whether it started playback

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

// =============================================================================
// Session Models
// =============================================================================

/// Opaque playlist session identifier returned by `POST /playlist`
///
/// The server generates it as a UUID, but nothing here relies on that:
/// it is passed back verbatim in `GET /play/<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap a raw identifier, rejecting empty strings
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Media Models
// =============================================================================

/// Extensions queued by default (without the leading dot)
pub const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &["mkv", "mp4", "mpg", "mpeg", "avi"];

/// Set of file extensions treated as playable video
///
/// Matching is case-sensitive against the final extension only, so
/// `movie.MP4` and `archive.mp4.part` are both rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoExtensions(Vec<String>);

impl VideoExtensions {
    /// Build from a list, tolerating a leading dot (`.mkv` or `mkv`)
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            extensions
                .into_iter()
                .map(|e| e.as_ref().trim_start_matches('.').to_string())
                .filter(|e| !e.is_empty())
                .collect(),
        )
    }

    /// Check whether a path carries one of the recognized extensions
    pub fn matches(&self, path: &Path) -> bool {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self.0.iter().any(|known| known == ext),
            None => false,
        }
    }
}

impl Default for VideoExtensions {
    fn default() -> Self {
        Self::new(DEFAULT_VIDEO_EXTENSIONS)
    }
}

// =============================================================================
// Report Models
// =============================================================================

/// Summary of a single run, printed at the end (JSON or human)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Files posted to the playlist, in submission order
    pub submitted: Vec<PathBuf>,
    /// Files seen but not queued because of their extension
    pub skipped: Vec<PathBuf>,
    /// Arguments that were missing or neither a file nor a directory
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignored: Vec<PathBuf>,
    /// Session identifier captured from the first successful response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
    /// Whether playback was suppressed (flag, config, or directory argument)
    pub queue_only: bool,
    /// Whether `GET /play/<id>` was issued
    pub played: bool,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Queued {} file(s), skipped {}",
            self.submitted.len(),
            self.skipped.len()
        )?;
        if !self.ignored.is_empty() {
            write!(f, ", ignored {} path(s)", self.ignored.len())?;
        }
        if self.played {
            if let Some(ref id) = self.session_id {
                write!(f, ", playing session {}", id)?;
            }
        } else if self.queue_only {
            write!(f, " (queue only)")?;
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // SessionId Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_session_id_rejects_empty() {
        assert!(SessionId::new("").is_none());
        assert_eq!(SessionId::new("abc-123").unwrap().as_str(), "abc-123");
    }

    #[test]
    fn test_session_id_serde_transparent() {
        let id = SessionId::new("abc-123").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc-123\"");
    }

    // -------------------------------------------------------------------------
    // VideoExtensions Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_default_extensions_match() {
        let exts = VideoExtensions::default();
        for name in ["a.mkv", "b.mp4", "c.mpg", "d.mpeg", "e.avi", "/media/dir/f.mp4"] {
            assert!(exts.matches(Path::new(name)), "should match {name}");
        }
    }

    #[test]
    fn test_default_extensions_reject() {
        let exts = VideoExtensions::default();
        for name in [
            "notes.txt",
            "poster.jpg",
            "subs.srt",
            "movie.MP4",
            "movie.Mkv",
            "movie.mp4.part",
            "mp4",
            "noextension",
        ] {
            assert!(!exts.matches(Path::new(name)), "should NOT match {name}");
        }
    }

    #[test]
    fn test_extensions_strip_leading_dot() {
        let exts = VideoExtensions::new([".webm", "mov", ""]);
        assert!(exts.matches(Path::new("clip.webm")));
        assert!(exts.matches(Path::new("clip.mov")));
        assert!(!exts.matches(Path::new("clip.mp4")));
        assert_eq!(exts, VideoExtensions::new(["webm", "mov"]));
    }

    // -------------------------------------------------------------------------
    // RunReport Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_report_display_playing() {
        let report = RunReport {
            submitted: vec![PathBuf::from("/media/movie.mp4")],
            session_id: SessionId::new("abc-123"),
            played: true,
            ..Default::default()
        };
        assert_eq!(
            report.to_string(),
            "Queued 1 file(s), skipped 0, playing session abc-123"
        );
    }

    #[test]
    fn test_report_display_queue_only() {
        let report = RunReport {
            submitted: vec![PathBuf::from("/a.mp4"), PathBuf::from("/b.mkv")],
            skipped: vec![PathBuf::from("/c.txt")],
            queue_only: true,
            ..Default::default()
        };
        assert_eq!(report.to_string(), "Queued 2 file(s), skipped 1 (queue only)");
    }

    #[test]
    fn test_report_display_ignored() {
        let report = RunReport {
            submitted: vec![PathBuf::from("/a.mp4")],
            ignored: vec![PathBuf::from("typo.mp4")],
            ..Default::default()
        };
        assert_eq!(
            report.to_string(),
            "Queued 1 file(s), skipped 0, ignored 1 path(s)"
        );
    }

    #[test]
    fn test_report_json_omits_missing_session() {
        let json = serde_json::to_value(RunReport::default()).unwrap();
        assert!(json.get("session_id").is_none());
        assert!(json.get("ignored").is_none());
        assert_eq!(json["played"], false);
    }
}
