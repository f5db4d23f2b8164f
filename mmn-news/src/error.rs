//! Error types for mmn-news
//!
//! Every kind except `Io`/`Common` is recoverable per artist: the run logs it
//! with the artist name and moves on to the next artist.

use std::path::PathBuf;
use thiserror::Error;

/// Why an artist search produced no usable candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// The remote search returned zero candidates
    NoResults,
    /// Candidates came back but none scored above the threshold
    NoConfidentMatch,
}

impl std::fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotFoundReason::NoResults => f.write_str("no search results"),
            NotFoundReason::NoConfidentMatch => f.write_str("no confident match"),
        }
    }
}

/// Reconciliation error type
#[derive(Debug, Error)]
pub enum NewsError {
    /// Remote search yielded nothing usable
    #[error("Artist not found: {name} ({reason})")]
    ArtistNotFound { name: String, reason: NotFoundReason },

    /// `artist.toml` exists but cannot be understood
    #[error("Malformed preferences {}: {reason}", path.display())]
    MalformedPreferences { path: PathBuf, reason: String },

    /// Transport or protocol failure talking to the remote catalog
    #[error("Remote catalog unavailable: {0}")]
    RemoteUnavailable(String),

    /// Interchange line that cannot be parsed
    #[error("Invalid interchange row at line {line}: {reason}")]
    InvalidInterchangeRow { line: usize, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// mmn-common error
    #[error("Common error: {0}")]
    Common(#[from] mmn_common::Error),
}

impl NewsError {
    /// Short kind label used in per-artist failure reports
    pub fn kind(&self) -> &'static str {
        match self {
            NewsError::ArtistNotFound { .. } => "ArtistNotFound",
            NewsError::MalformedPreferences { .. } => "MalformedPreferences",
            NewsError::RemoteUnavailable(_) => "RemoteUnavailable",
            NewsError::InvalidInterchangeRow { .. } => "InvalidInterchangeRow",
            NewsError::Io(_) => "Io",
            NewsError::Common(_) => "Common",
        }
    }
}

/// Result type for reconciliation operations
pub type NewsResult<T> = Result<T, NewsError>;
