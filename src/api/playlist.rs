//! Playback server playlist client
//!
//! Talks to the Chromecast playback server's web API:
//! - `POST /playlist` with a raw file path body queues a track
//! - `GET /play/<uuid>` starts playback of a queued session
//!
//! Each request goes out on a fresh connection; nothing is pooled between
//! submissions.

use reqwest::StatusCode;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::models::SessionId;

/// Default address of the playback server's web API
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Playlist client error types
#[derive(Error, Debug)]
pub enum PlaylistError {
    #[error("Playback server request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// Playback server playlist client
pub struct PlaylistClient {
    base_url: String,
    client: reqwest::Client,
}

impl PlaylistClient {
    /// Create a client for the default local server
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, None)
    }

    /// Create a client with an optional per-request timeout
    ///
    /// `None` waits forever on an unresponsive server.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        let mut builder = reqwest::Client::builder().pool_max_idle_per_host(0);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: builder.build().unwrap_or_default(),
        }
    }

    /// Queue a file on the server's playlist
    ///
    /// Returns the session identifier when the server answers 200 with a
    /// JSON body carrying `uuid`. Any other status, or a body that cannot
    /// be read or parsed, yields `Ok(None)`. Only transport failures are
    /// errors.
    pub async fn add(&self, path: &Path) -> Result<Option<SessionId>, PlaylistError> {
        let url = format!("{}/playlist", self.base_url);
        let body = path.as_os_str().as_encoded_bytes().to_vec();

        let response = self.client.post(&url).body(body).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!(%status, path = %path.display(), "playlist rejected file");
            return Ok(None);
        }

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                debug!(error = %e, "failed to read playlist response body");
                return Ok(None);
            }
        };

        Ok(parse_session(&text))
    }

    /// Start playback of a playlist session
    ///
    /// The response is not inspected beyond its status, which is returned
    /// for logging.
    pub async fn play(&self, session: &SessionId) -> Result<StatusCode, PlaylistError> {
        let url = format!(
            "{}/play/{}",
            self.base_url,
            urlencoding::encode(session.as_str())
        );

        let response = self.client.get(&url).send().await?;
        Ok(response.status())
    }
}

impl Default for PlaylistClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the session identifier from a playlist response body
///
/// Only a JSON object with a string `uuid` field counts.
fn parse_session(body: &str) -> Option<SessionId> {
    let data: Value = match serde_json::from_str(body) {
        Ok(data) => data,
        Err(e) => {
            debug!(error = %e, "ignoring unparseable playlist response");
            return None;
        }
    };

    let uuid = data.get("uuid").and_then(Value::as_str);
    if uuid.is_none() {
        debug!("playlist response carries no uuid");
    }
    uuid.and_then(SessionId::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_session() {
        assert_eq!(
            parse_session(r#"{"uuid":"abc-123"}"#),
            SessionId::new("abc-123")
        );
        // Extra fields are ignored
        assert_eq!(
            parse_session(r#"{"uuid":"abc-123","tracks":[]}"#),
            SessionId::new("abc-123")
        );
    }

    #[test]
    fn test_parse_session_failures() {
        assert!(parse_session("").is_none());
        assert!(parse_session("not json").is_none());
        assert!(parse_session("{}").is_none());
        assert!(parse_session(r#"{"uuid":42}"#).is_none());
        assert!(parse_session(r#"{"uuid":""}"#).is_none());
        assert!(parse_session(r#"["abc-123"]"#).is_none());
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = PlaylistClient::with_base_url("http://127.0.0.1:9000/");
        assert_eq!(client.base_url, "http://127.0.0.1:9000");
        assert_eq!(PlaylistClient::new().base_url, DEFAULT_BASE_URL);
    }
}
