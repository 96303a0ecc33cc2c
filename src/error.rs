//! Error types shared by every stage of card rendering.

use std::path::PathBuf;

use thiserror::Error;

use crate::text::FontRole;

/// Errors produced while loading fonts, fetching invites or composing a card.
#[derive(Debug, Error)]
pub enum CardError {
    /// A required font could not be read or parsed. Fatal at startup.
    #[error("failed to load {role:?} font from '{}': {reason}", .path.display())]
    FontLoad {
        role: FontRole,
        path: PathBuf,
        reason: String,
    },

    /// Glyph outlines could not be produced for a text run.
    #[error("shaping failed: {0}")]
    Shaping(String),

    /// The invite or its icon could not be retrieved.
    #[error("invite data unavailable: {0}")]
    DataUnavailable(String),

    /// An input that passed validation still broke a composition invariant.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl From<reqwest::Error> for CardError {
    fn from(err: reqwest::Error) -> Self {
        CardError::DataUnavailable(err.to_string())
    }
}

pub type Result<T, E = CardError> = std::result::Result<T, E>;
