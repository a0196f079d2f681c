//! Error type shared by every pipeline step.
//!
//! A word that is simply absent from the dictionary is not an error; see
//! [`crate::pipeline::Outcome::NotFound`].

use std::path::PathBuf;
use std::process::ExitStatus;

/// Failure of a single HTTP GET (transport error or non-2xx status).
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// Curl reported an error (DNS, connect, timeout, aborted write, ...).
    #[error(transparent)]
    Curl(#[from] curl::Error),
    /// Server answered with a non-2xx status.
    #[error("HTTP {0}")]
    Status(u32),
}

#[derive(Debug, thiserror::Error)]
pub enum PeError {
    /// No word (or only whitespace) was given.
    #[error("empty word")]
    EmptyWord,

    /// A configuration value is unusable (bad base URL, selector, ...).
    #[error("invalid config: {0}")]
    Config(String),

    /// The dictionary page could not be fetched.
    #[error("fetching {url} failed")]
    Fetch {
        url: String,
        #[source]
        source: HttpError,
    },

    /// The audio file could not be fetched.
    #[error("downloading {url} failed")]
    Download {
        url: String,
        #[source]
        source: HttpError,
    },

    /// The audio file could not be created or written locally.
    #[error("cannot write {}", path.display())]
    DownloadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// None of the candidate players exists on the search path.
    #[error("play command ({}) is not found", candidates.join(", "))]
    PlayerNotFound { candidates: Vec<String> },

    /// The player process could not be started.
    #[error("cannot start {player}")]
    PlaybackSpawn {
        player: String,
        #[source]
        source: std::io::Error,
    },

    /// The player exited unsuccessfully.
    #[error("{player} exited with {status}")]
    PlaybackStatus { player: String, status: ExitStatus },

    /// A blocking pipeline step panicked or was cancelled.
    #[error("background task failed")]
    Task(#[from] tokio::task::JoinError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_not_found_names_every_candidate() {
        let err = PeError::PlayerNotFound {
            candidates: vec!["mpg123".to_string(), "afplay".to_string()],
        };
        assert_eq!(err.to_string(), "play command (mpg123, afplay) is not found");
    }

    #[test]
    fn fetch_error_keeps_http_source() {
        let err = PeError::Fetch {
            url: "https://example.com/x".to_string(),
            source: HttpError::Status(404),
        };
        assert_eq!(err.to_string(), "fetching https://example.com/x failed");
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "HTTP 404");
    }
}
