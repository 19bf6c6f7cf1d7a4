//! Directory walking
//!
//! Breadth-first walk over a directory tree driven by an explicit queue of
//! pending directories. Every directory is keyed by its canonical path in a
//! visited set, so symlink loops and aliased directories are read once.
//!
//! Symlinks are followed: an entry that resolves to a file is yielded, one
//! that resolves to a directory is queued. Anything else (broken links,
//! sockets, fifos) is skipped.

use std::collections::{HashSet, VecDeque};
use std::fs::{self, ReadDir};
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised while walking a directory tree
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to resolve {}: {source}", path.display())]
    Resolve { path: PathBuf, source: io::Error },

    #[error("Failed to read directory {}: {source}", path.display())]
    ReadDir { path: PathBuf, source: io::Error },
}

/// Iterator over every file below a root directory
///
/// Yields file paths as they were reached (root joined with entry names),
/// not their canonical form. Entry order within a directory follows the
/// underlying listing and is unspecified.
pub struct Walk {
    pending: VecDeque<PathBuf>,
    visited: HashSet<PathBuf>,
    current: Option<(PathBuf, ReadDir)>,
}

impl Walk {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            pending: VecDeque::from([root.into()]),
            visited: HashSet::new(),
            current: None,
        }
    }

    /// Number of distinct directories opened so far
    pub fn visited(&self) -> usize {
        self.visited.len()
    }

    /// Pop queued directories until one that has not been seen opens
    fn open_next(&mut self) -> Option<Result<(), ScanError>> {
        loop {
            let dir = self.pending.pop_front()?;

            let canonical = match fs::canonicalize(&dir) {
                Ok(c) => c,
                Err(source) => return Some(Err(ScanError::Resolve { path: dir, source })),
            };
            if !self.visited.insert(canonical) {
                debug!(dir = %dir.display(), "directory already walked, skipping");
                continue;
            }

            return match fs::read_dir(&dir) {
                Ok(entries) => {
                    trace!(dir = %dir.display(), "reading directory");
                    self.current = Some((dir, entries));
                    Some(Ok(()))
                }
                Err(source) => Some(Err(ScanError::ReadDir { path: dir, source })),
            };
        }
    }
}

impl Iterator for Walk {
    type Item = Result<PathBuf, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let Some((dir, entries)) = self.current.as_mut() else {
                if let Err(e) = self.open_next()? {
                    return Some(Err(e));
                }
                continue;
            };

            let entry = match entries.next() {
                Some(Ok(entry)) => entry,
                Some(Err(source)) => {
                    let path = dir.clone();
                    self.current = None;
                    return Some(Err(ScanError::ReadDir { path, source }));
                }
                None => {
                    self.current = None;
                    continue;
                }
            };

            let path = entry.path();
            match fs::metadata(&path) {
                Ok(meta) if meta.is_file() => return Some(Ok(path)),
                Ok(meta) if meta.is_dir() => self.pending.push_back(path),
                Ok(_) => debug!(path = %path.display(), "not a file or directory, skipping"),
                Err(e) => debug!(path = %path.display(), error = %e, "unreadable entry, skipping"),
            }
        }
    }
}
