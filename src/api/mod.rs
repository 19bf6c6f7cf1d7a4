//! API clients for external services
//!
//! - Playlist: the local playback server's queue and play endpoints

pub mod playlist;

pub use playlist::{PlaylistClient, PlaylistError};
